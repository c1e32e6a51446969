//! Type descriptor scanning for reference parsing.

use thiserror::Error;

/// Failure to parse a reference from its smali form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("missing `->` between class and member in `{0}`")]
    MissingArrow(String),

    #[error("missing parameter list in `{0}`")]
    MissingParameters(String),

    #[error("missing `:` before field type in `{0}`")]
    MissingFieldType(String),

    #[error("empty member name in `{0}`")]
    EmptyName(String),

    #[error("malformed type descriptor `{descriptor}` at offset {offset}")]
    MalformedType { descriptor: String, offset: usize },
}

/// Length of the type descriptor at the start of `bytes`.
///
/// `V` is only accepted when `allow_void` is set and never as an array
/// component.
fn type_len(bytes: &[u8], allow_void: bool) -> Option<usize> {
    let dims = bytes.iter().take_while(|&&b| b == b'[').count();
    match bytes.get(dims)? {
        b'Z' | b'B' | b'S' | b'C' | b'I' | b'J' | b'F' | b'D' => Some(dims + 1),
        b'V' if allow_void && dims == 0 => Some(1),
        b'L' => {
            let semi = bytes[dims..].iter().position(|&b| b == b';')?;
            // `L;` has no class name.
            (semi > 1).then_some(dims + semi + 1)
        }
        _ => None,
    }
}

/// Check that `descriptor` is exactly one type descriptor.
pub(super) fn single_type(descriptor: &str, allow_void: bool) -> Result<&str, DescriptorError> {
    match type_len(descriptor.as_bytes(), allow_void) {
        Some(len) if len == descriptor.len() => Ok(descriptor),
        Some(len) => Err(DescriptorError::MalformedType {
            descriptor: descriptor.to_owned(),
            offset: len,
        }),
        None => Err(DescriptorError::MalformedType {
            descriptor: descriptor.to_owned(),
            offset: 0,
        }),
    }
}

/// Split a concatenated parameter list such as `ILjava/lang/String;[J`.
pub(super) fn split_types(list: &str) -> Result<Vec<&str>, DescriptorError> {
    let mut types = Vec::new();
    let mut offset = 0;
    while offset < list.len() {
        let len = type_len(&list.as_bytes()[offset..], false).ok_or_else(|| {
            DescriptorError::MalformedType {
                descriptor: list.to_owned(),
                offset,
            }
        })?;
        types.push(&list[offset..offset + len]);
        offset += len;
    }
    Ok(types)
}

/// Split `Lcls;->member` at the arrow.
pub(super) fn split_member(reference: &str) -> Result<(&str, &str), DescriptorError> {
    let (class, member) = reference
        .split_once("->")
        .ok_or_else(|| DescriptorError::MissingArrow(reference.to_owned()))?;
    single_type(class, false)?;
    Ok((class, member))
}
