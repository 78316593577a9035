/// Characters that are not allowed in a path component on common desktop filesystems.
const ILLEGAL: [char; 9] = ['<', '>', '"', '|', ':', '*', '?', '\\', '/'];

/// Turn an arbitrary title into something usable as a file name.
///
/// Everything outside printable ASCII is dropped, then each of
/// `< > " | : * ? \ /` becomes `_`. Never fails and is idempotent.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| matches!(c, ' '..='~'))
        .map(|c| if ILLEGAL.contains(&c) { '_' } else { c })
        .collect()
}
