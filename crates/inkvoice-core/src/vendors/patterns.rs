//! Line patterns for the supported supplier invoices.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // World Famous: "<fulfilled> <ordered> <quantity> $<rate> $<amount>"
    pub static ref WF_QUANTITY_LINE: Regex = Regex::new(
        r"\b(\d+)\s+(\d+)\s+(\d+)\s+\$[\d,.]+\s+\$[\d,.]+"
    ).unwrap();

    // World Famous and Kuro Sumi SKUs: WFBB2, WFADPP12, KSSW1.5, WFPW1/2
    pub static ref WF_ITEM_CODE: Regex = Regex::new(
        r"\b(?:WF|KS)[A-Z0-9]+(?:\.\d+)?(?:/\d+)?"
    ).unwrap();

    pub static ref WF_BOILERPLATE: Regex = Regex::new(
        r"Qty Fulfilled|Page|Subtotal|Total|Order Information|Sales Order"
    ).unwrap();

    pub static ref WF_DESCRIPTION_SIZE: Regex = Regex::new(
        r"(\d+(?:\.\d+)?)\s*(?:/\s*(\d+))?\s*oz"
    ).unwrap();

    pub static ref WF_BOTTLE_COUNT: Regex = Regex::new(
        r"(\d+)\s*Bottle"
    ).unwrap();

    pub static ref MID_TONE: Regex = Regex::new(
        r"(?i)Mid[- ]tone"
    ).unwrap();

    pub static ref LEADING_DIGITS: Regex = Regex::new(
        r"\d+"
    ).unwrap();

    // Eternal: "<code> <description> <qty> <rate> <amount>"
    pub static ref ETERNAL_LINE: Regex = Regex::new(
        r"^\s*([A-Z0-9]+(?:-[0-9]+(?:/[0-9]+)?(?:NB)?)?)\s+(.*?)\s+(\d+(?:,\d+)?)\s+[\d,.]+\s+[\d,.]+\s*$"
    ).unwrap();

    pub static ref ETERNAL_BOILERPLATE: Regex = Regex::new(
        r"^(?:Page \d+|Item|Description|Ordered|Rate|Amount|Total)$|^(?:Sales Order|Date|Ship To)\b"
    ).unwrap();

    pub static ref ETERNAL_CODE_SIZE: Regex = Regex::new(
        r"-(1/2|4|2)(?:NB)?$"
    ).unwrap();

    pub static ref ETERNAL_DESCRIPTION_SIZE: Regex = Regex::new(
        r"(?i)(\d+(?:/\d+)?)\s*(?:ounces?|oz)\b"
    ).unwrap();

    pub static ref ETERNAL_PLACEHOLDER: Regex = Regex::new(
        r"(?i)^(?:ounce|bottles?)$"
    ).unwrap();

    // Solid Ink: "<SKU> <description> $<unit price> <qty> $<amount>"
    pub static ref SOLID_INK_HEADER: Regex = Regex::new(
        r"(?i)^SKU\s+Description\s+Unit Price\s+Pack Quantity\s+Amount$"
    ).unwrap();

    pub static ref SOLID_INK_LINE: Regex = Regex::new(
        r"^(\w{3,5})\s+(.+?)\s+\$?([\d,.]+)\s+([\d,]+)\s+\$?([\d,.]+)$"
    ).unwrap();

    pub static ref SOLID_INK_SIZE: Regex = Regex::new(
        r"(?i)\d+\s*/\s*\d+\s*(?:oz|ounces?)\b|\d+(?:\.\d+)?\s*(?:oz|ounces?)\b"
    ).unwrap();

    pub static ref SOLID_INK_SIZE_LABEL: Regex = Regex::new(
        r"(?i)-?\s*(?:Size:?\s*)?(?:\d+\s*/\s*\d+|\d+(?:\.\d+)?)\s*(?:oz|ounces?)\b"
    ).unwrap();

    pub static ref SOLID_INK_METADATA: Regex = Regex::new(
        r"(?i)^(?:Invoice|Sold To|Shipping Address|Payment Due|Ship By|Sales Rep|Paid)|^\d{1,2}/\d{1,2}/\d{2,4}"
    ).unwrap();
}
