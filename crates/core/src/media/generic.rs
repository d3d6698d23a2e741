use std::borrow::Cow;

use super::Payloader;

/// Passthrough payloader for codecs that need no fragmentation
/// (e.g. Opus, RFC 7587 §4.2): one RTP payload per input buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenericPayloader;

impl Payloader for GenericPayloader {
    fn payload<'a>(&self, data: &'a [u8]) -> Vec<Cow<'a, [u8]>> {
        vec![Cow::Borrowed(data)]
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}
