/*!
Byte-level CBOR tag framing.

COSE messages are commonly wrapped in one or more tags: the self-described
CBOR tag 55799, the CWT tag 61, and the message-type tag.  Tags are matched
on their exact encoded prefix, which is all the message layer needs and
keeps the decoder free of general tag support.
*/

/// Tag 55799, self-described CBOR.
pub const CBOR_SELF_PREFIX: &[u8] = &[0xd9, 0xd9, 0xf7];
/// Tag 61, CWT.
pub const CWT_PREFIX: &[u8] = &[0xd8, 0x3d];
/// Tag 18, COSE_Sign1.
pub const SIGN1_MESSAGE_PREFIX: &[u8] = &[0xd2];
/// Tag 17, COSE_Mac0.
pub const MAC0_MESSAGE_PREFIX: &[u8] = &[0xd1];
/// Tag 16, COSE_Encrypt0.
pub const ENCRYPT0_MESSAGE_PREFIX: &[u8] = &[0xd0];

/// Prepends `prefix` to `data`.
pub fn with_tag(prefix: &[u8], data: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(prefix.len() + data.len());
    v.extend_from_slice(prefix);
    v.extend_from_slice(data);
    v
}

/// Strips `prefix` from `data` if present, otherwise returns `data` unchanged.
pub fn skip_tag<'a>(prefix: &[u8], data: &'a [u8]) -> &'a [u8] {
    data.strip_prefix(prefix).unwrap_or(data)
}

/// Strips, in order, the optional self-described, CWT and message-type tags.
pub(crate) fn skip_message_tags<'a>(message_prefix: &[u8], data: &'a [u8]) -> &'a [u8] {
    skip_tag(
        message_prefix,
        skip_tag(CWT_PREFIX, skip_tag(CBOR_SELF_PREFIX, data)),
    )
}
