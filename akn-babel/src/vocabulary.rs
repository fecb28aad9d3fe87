//! Attribute names shared by the AKN and HTML sides
//!
//! HTML carries AKN identities in `data-*` attributes so that an editor round trip can put
//! them back. Each table below lists `(akn, html)` pairs in the order products emit them.

pub const XML_ID: &str = "xml:id";
pub const LEOS_ORIGIN: &str = "leos:origin";
pub const ID: &str = "id";

pub const DATA_AKN_NAME: &str = "data-akn-name";
pub const DATA_AKN_NUM: &str = "data-akn-num";
pub const DATA_AKN_NUM_ID: &str = "data-akn-num-id";
pub const DATA_AKN_CONTENT_ID: &str = "data-akn-content-id";
pub const DATA_AKN_WRAPPED_CONTENT_ID: &str = "data-akn-wrapped-content-id";
pub const DATA_AKN_MP_ID: &str = "data-akn-mp-id";
pub const DATA_NUM_ORIGIN: &str = "data-num-origin";
pub const DATA_CONTENT_ORIGIN: &str = "data-content-origin";
pub const DATA_WRAPPED_CONTENT_ORIGIN: &str = "data-wrapped-content-origin";
pub const DATA_MP_ORIGIN: &str = "data-mp-origin";
pub const DATA_ORIGIN: &str = "data-origin";

/// Identity of a structural root plus its editable and soft-action markers.
pub const ROOT: &[(&str, &str)] = &[
    (XML_ID, ID),
    (LEOS_ORIGIN, DATA_ORIGIN),
    ("leos:editable", "data-akn-attr-editable"),
    ("leos:softaction", "data-akn-attr-softaction"),
    ("leos:softactionroot", "data-akn-attr-softactionroot"),
    ("leos:softuser", "data-akn-attr-softuser"),
    ("leos:softdate", "data-akn-attr-softdate"),
    ("leos:softmove_to", "data-akn-attr-softmove_to"),
    ("leos:softmove_from", "data-akn-attr-softmove_from"),
    ("leos:softmove_label", "data-akn-attr-softmove_label"),
    ("leos:softtrans_from", "data-akn-attr-softtrans_from"),
];

/// Plain identity: `xml:id`/`leos:origin` against `id`/`data-origin`.
pub const IDENTITY: &[(&str, &str)] = &[(XML_ID, ID), (LEOS_ORIGIN, DATA_ORIGIN)];

pub const NUM: &[(&str, &str)] = &[(XML_ID, DATA_AKN_NUM_ID), (LEOS_ORIGIN, DATA_NUM_ORIGIN)];

pub const CONTENT: &[(&str, &str)] = &[
    (XML_ID, DATA_AKN_CONTENT_ID),
    (LEOS_ORIGIN, DATA_CONTENT_ORIGIN),
];

pub const WRAPPED_CONTENT: &[(&str, &str)] = &[
    (XML_ID, DATA_AKN_WRAPPED_CONTENT_ID),
    (LEOS_ORIGIN, DATA_WRAPPED_CONTENT_ORIGIN),
];

pub const MP: &[(&str, &str)] = &[(XML_ID, DATA_AKN_MP_ID), (LEOS_ORIGIN, DATA_MP_ORIGIN)];

/// HTML attribute carrying the id of a wrapper element, e.g. `data-akn-alinea-id`.
pub fn wrapper_id(wrapper: &str) -> String {
    format!("data-akn-{wrapper}-id")
}

/// HTML attribute carrying the origin of a wrapper element, e.g. `data-alinea-origin`.
pub fn wrapper_origin(wrapper: &str) -> String {
    format!("data-{wrapper}-origin")
}
