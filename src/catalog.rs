use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;

/// Human-readable description of one custom program error code.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ErrorEntry {
    pub name: String,
    pub message: String,
}

/// A program known to the catalog and the error codes it can raise.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ProgramEntry {
    pub name: String,
    /// Keyed by lower-cased hex code, e.g. `"0x1"`.
    #[serde(default)]
    pub errors: HashMap<String, ErrorEntry>,
}

/// Read-only lookup table from `(program_id, error_code)` to a description.
///
/// Built once at startup from a JSON document shaped as
/// `{ "<program_id>": { "name": "...", "errors": { "0x1": { "name": "...", "message": "..." } } } }`
/// and shared behind an `Arc` afterwards. There is no mutation API.
#[derive(Debug, Clone, Default)]
pub struct ErrorCatalog {
    programs: HashMap<String, ProgramEntry>,
}

impl ErrorCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| Error::Catalog {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, Error> {
        let raw: HashMap<String, ProgramEntry> = serde_json::from_str(data)?;
        Self::from_programs(raw)
    }

    /// Normalizes every error code key to lowercase and rejects keys that are
    /// not `0x`-prefixed hex literals.
    fn from_programs(raw: HashMap<String, ProgramEntry>) -> Result<Self, Error> {
        let mut programs = HashMap::with_capacity(raw.len());
        for (program_id, entry) in raw {
            let mut errors = HashMap::with_capacity(entry.errors.len());
            for (code, error) in entry.errors {
                let normalized = code.to_ascii_lowercase();
                if !is_hex_code(&normalized) {
                    return Err(Error::Catalog {
                        reason: format!(
                            "program {program_id}: error code {code:?} is not a 0x-prefixed hex literal"
                        ),
                    });
                }
                if errors.insert(normalized, error).is_some() {
                    return Err(Error::Catalog {
                        reason: format!("program {program_id}: duplicate error code {code:?}"),
                    });
                }
            }
            programs.insert(
                program_id,
                ProgramEntry {
                    name: entry.name,
                    errors,
                },
            );
        }
        Ok(Self { programs })
    }

    /// Case-insensitive in `error_code`.
    pub fn lookup(&self, program_id: &str, error_code: &str) -> Option<&ErrorEntry> {
        let program = self.programs.get(program_id)?;
        program.errors.get(&error_code.to_ascii_lowercase())
    }

    /// The catalog's name for `program_id`, or the id itself for unknown programs.
    pub fn display_name<'a>(&'a self, program_id: &'a str) -> &'a str {
        self.programs
            .get(program_id)
            .map_or(program_id, |p| p.name.as_str())
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn error_count(&self) -> usize {
        self.programs.values().map(|p| p.errors.len()).sum()
    }
}

fn is_hex_code(code: &str) -> bool {
    code.strip_prefix("0x")
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()))
}
