use crate::utils::errors::dss_read_errors::DssReadError;
use std::fmt;

/// Six-part DSS record address, `/A/B/C/D/E/F/`.
/// Parts may be empty; matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DssPathname {
    parts: [String; 6],
}

impl DssPathname {
    pub fn parse(raw: &str) -> Result<Self, DssReadError> {
        let trimmed = raw.trim();

        let inner = trimmed
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .ok_or_else(|| DssReadError::InvalidPathname {
                pathname: trimmed.to_string(),
                reason: "must start and end with '/'",
            })?;

        let mut parts: Vec<String> = inner.split('/').map(str::to_string).collect();
        // The default form pathname omits the F part; normalize it to empty.
        if parts.len() == 5 {
            parts.push(String::new());
        }
        let parts: [String; 6] =
            parts
                .try_into()
                .map_err(|_| DssReadError::InvalidPathname {
                    pathname: trimmed.to_string(),
                    reason: "expected six parts between seven slashes",
                })?;

        Ok(Self { parts })
    }

    pub fn matches(&self, other: &DssPathname) -> bool {
        self.parts
            .iter()
            .zip(other.parts.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl fmt::Display for DssPathname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.parts.join("/"))
    }
}
