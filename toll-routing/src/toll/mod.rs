//! Wire format for the toll routing SOAP service.
//!
//! The service is a legacy system that binds parameters by position and
//! parses XML strictly, so the encoders here produce byte-exact payloads:
//! element order is fixed, there is no whitespace between elements, and
//! text content is entity-escaped. Responses arrive already decoded by the
//! SOAP transport as a loosely typed tree ([`serde_json::Value`]); the
//! parsers normalize it into plain records and never fail on missing
//! fields.
//!
//! This module does no I/O.

mod encode;
mod error;
mod parse;

pub use encode::{encode_plaza_id_list, encode_route_options, encode_waypoints};
pub use error::TollError;
pub use parse::{
    extract_plaza_ids, parse_plaza_response, parse_route_registration, parse_routing_response,
};
