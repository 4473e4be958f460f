use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Whether `param` has to be written as the colon-marked trailing parameter.
///
/// Anything with a space must be. A final parameter that is empty or starts
/// with `:` also needs the marker, otherwise it would not reparse.
#[inline]
fn needs_trailing_marker(param: &str, is_last: bool) -> bool {
    param.contains(' ') || (is_last && (param.is_empty() || param.starts_with(':')))
}

/// Writes the line without a terminator.
///
/// A parameter that needs the trailing marker ends the line: parameters
/// after it cannot be represented and are not written.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command)?;

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if needs_trailing_marker(param, i == last) {
                write!(f, " :{}", param)?;
                break;
            }
            write!(f, " {}", param)?;
        }

        Ok(())
    }
}
