//! Rust source generation for `-X pkg.var`.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// The `pkg.var` target of a generated fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Name of the generated module.
    pub module: String,
    /// Name of the static inside the module.
    pub var: String,
}

/// Words that cannot name a module or static.
const KEYWORDS: [&str; 51] = [
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while",
];

/// A `-X` argument that is not of the form `pkg.var`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid symbol {0:?}; expected pkg.var")]
pub struct InvalidSymbol(pub String);

impl FromStr for Symbol {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [module, var] if is_identifier(module) && is_identifier(var) => {
                Ok(Self { module: (*module).to_string(), var: (*var).to_string() })
            }
            _ => Err(InvalidSymbol(s.to_string())),
        }
    }
}

/// Whether `word` can name a Rust module or static.
fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && word != "_"
        && !KEYWORDS.contains(&word)
}

/// Comment header identifying how a fragment was produced.
#[derive(Debug, Clone)]
pub struct Header {
    /// Name and version of the generator.
    pub generator: String,
    /// When the fragment was generated, as rendered by [`Clock::stamp`].
    ///
    /// [`Clock::stamp`]: crate::ports::Clock::stamp
    pub timestamp: String,
    /// The invoking command line.
    pub command: String,
}

/// Writes a Rust module defining `symbol` as a lazily built [`GitInfo`]
/// holding the values of `map`.
///
/// Entries are emitted sorted by key, so the payload is identical for
/// identical maps. With `runtime`, the static first tries live information
/// for the file it is compiled into and falls back to the frozen values.
///
/// [`GitInfo`]: crate::GitInfo
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn generate(
    out: &mut dyn Write,
    map: &BTreeMap<String, String>,
    symbol: &Symbol,
    runtime: bool,
    header: &Header,
) -> io::Result<()> {
    writeln!(out, "// generated by {}", header.generator)?;
    writeln!(out, "//           on {}", header.timestamp)?;
    writeln!(out, "//   DO NOT EDIT; local changes will be overridden")?;
    writeln!(out, "//")?;
    writeln!(out, "//   % {}", header.command.replace('\n', "\\n"))?;
    writeln!(out)?;
    writeln!(out, "pub mod {} {{", symbol.module)?;
    writeln!(out, "    use std::sync::LazyLock;")?;
    writeln!(out)?;
    writeln!(out, "    use gitinfo::{{GitInfo, Snapshot}};")?;
    writeln!(out)?;
    writeln!(out, "    #[allow(non_upper_case_globals)]")?;
    writeln!(
        out,
        "    pub static {}: LazyLock<Box<dyn GitInfo + Send + Sync>> = LazyLock::new(|| {{",
        symbol.var
    )?;
    if runtime {
        writeln!(out, "        if let Ok(info) = gitinfo::here!() {{")?;
        writeln!(out, "            if info.root().is_some() {{")?;
        writeln!(out, "                return Box::new(info);")?;
        writeln!(out, "            }}")?;
        writeln!(out, "        }}")?;
    }
    writeln!(out, "        let fields: [(&str, &str); {}] = [", map.len())?;
    for (key, value) in map {
        writeln!(out, "            ({key:?}, {value:?}),")?;
    }
    writeln!(out, "        ];")?;
    writeln!(out, "        Box::new(Snapshot::build(fields))")?;
    writeln!(out, "    }});")?;
    writeln!(out, "}}")?;
    Ok(())
}
