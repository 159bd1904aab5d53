//! Lead capture: inquiry messages and their hand-off links

mod handoff;
mod inquiry;

pub use handoff::{whatsapp_link, WHATSAPP_BASE_URL};
pub use inquiry::{format_inquiry, Inquiry};
