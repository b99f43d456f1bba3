//! The check catalog.
//!
//! Every check is declared once in [`declare_checks!`] with its alias,
//! category, whether it can fix its findings, and the function that runs it.
//! The declaration order is the registration order used to break ties when
//! sorting diagnostics.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::diagnostic::Diagnostic;
use crate::error::Error;
use crate::lints;
use crate::source::SourceModel;

/// Prefix turning an alias into a canonical check identifier.
pub const ID_PREFIX: &str = "check_";

/// Category of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Code that works but wastes time or memory, or is dead
    Optimization,
    /// Code that opens the door to injection, tampering, or leaks
    Security,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimization => "optimization",
            Self::Security => "security",
        }
    }

    pub const ALL: &'static [Category] = &[Category::Optimization, Category::Security];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimization" => Ok(Self::Optimization),
            "security" => Ok(Self::Security),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}

macro_rules! declare_checks {
    (
        $(
            $variant:ident => {
                alias: $alias:literal,
                category: $category:ident,
                fixable: $fixable:literal,
                run: $run:path,
            }
        ),* $(,)?
    ) => {
        /// Enum representing all available checks
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Check {
            $($variant),*
        }

        impl Check {
            /// Short name, as accepted by `--skip-checks`
            pub const fn alias(self) -> &'static str {
                match self {
                    $(Self::$variant => $alias),*
                }
            }

            /// Canonical identifier: the alias with the `check_` prefix
            pub const fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("check_", $alias)),*
                }
            }

            /// Get the check's category
            pub const fn category(self) -> Category {
                match self {
                    $(Self::$variant => Category::$category),*
                }
            }

            /// Whether the check proposes edits for its findings
            pub const fn is_fixable(self) -> bool {
                match self {
                    $(Self::$variant => $fixable),*
                }
            }

            /// Run the check over a parsed source.
            ///
            /// Returns the findings in emission order. An error here is a
            /// defect of the check, never a finding.
            pub fn run(self, model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
                match self {
                    $(Self::$variant => $run(model)),*
                }
            }

            /// Get all checks in registration order
            pub const fn all() -> &'static [Check] {
                ALL_CHECKS
            }
        }

        /// Static array containing all checks, in registration order
        pub const ALL_CHECKS: &[Check] = &[
            $(Check::$variant),*
        ];
    };
}

declare_checks! {
    UnusedImport => {
        alias: "unused_import",
        category: Optimization,
        fixable: true,
        run: lints::unused_import::unused_import::unused_import,
    },
    UnreachableCode => {
        alias: "unreachable_code",
        category: Optimization,
        fixable: true,
        run: lints::unreachable_code::unreachable_code::unreachable_code,
    },
    StringConcatInLoop => {
        alias: "string_concat_in_loop",
        category: Optimization,
        fixable: false,
        run: lints::string_concat_in_loop::string_concat_in_loop::string_concat_in_loop,
    },
    RangeLen => {
        alias: "range_len",
        category: Optimization,
        fixable: false,
        run: lints::range_len::range_len::range_len,
    },
    AppendInLoop => {
        alias: "append_in_loop",
        category: Optimization,
        fixable: false,
        run: lints::append_in_loop::append_in_loop::append_in_loop,
    },
    UnusedVariable => {
        alias: "unused_variable",
        category: Optimization,
        fixable: false,
        run: lints::unused_variable::unused_variable::unused_variable,
    },
    DeeplyNestedLoop => {
        alias: "deeply_nested_loop",
        category: Optimization,
        fixable: false,
        run: lints::deeply_nested_loop::deeply_nested_loop::deeply_nested_loop,
    },
    NoExec => {
        alias: "no_exec",
        category: Security,
        fixable: false,
        run: lints::no_exec::no_exec::no_exec,
    },
    NoEval => {
        alias: "no_eval",
        category: Security,
        fixable: false,
        run: lints::no_eval::no_eval::no_eval,
    },
    SubprocessShell => {
        alias: "subprocess_shell",
        category: Security,
        fixable: false,
        run: lints::subprocess_shell::subprocess_shell::subprocess_shell,
    },
    PickleLoad => {
        alias: "pickle_load",
        category: Security,
        fixable: false,
        run: lints::pickle_load::pickle_load::pickle_load,
    },
    YamlLoad => {
        alias: "yaml_load",
        category: Security,
        fixable: true,
        run: lints::yaml_load::yaml_load::yaml_load,
    },
    WeakHash => {
        alias: "weak_hash",
        category: Security,
        fixable: false,
        run: lints::weak_hash::weak_hash::weak_hash,
    },
    HardcodedSecret => {
        alias: "hardcoded_secret",
        category: Security,
        fixable: false,
        run: lints::hardcoded_secret::hardcoded_secret::hardcoded_secret,
    },
    SslVerify => {
        alias: "ssl_verify",
        category: Security,
        fixable: false,
        run: lints::ssl_verify::ssl_verify::ssl_verify,
    },
}

impl Check {
    /// Position in the registration order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get all checks in a specific category
    pub fn by_category(category: Category) -> impl Iterator<Item = Check> {
        ALL_CHECKS
            .iter()
            .copied()
            .filter(move |c| c.category() == category)
    }

    /// Look a check up by alias.
    pub fn from_alias(alias: &str) -> Option<Self> {
        registry().by_alias.get(alias).copied()
    }

    /// Look a check up by canonical identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        registry().by_id.get(id).copied()
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Lookup tables over [`ALL_CHECKS`], built once per process.
struct Registry {
    by_alias: FxHashMap<&'static str, Check>,
    by_id: FxHashMap<&'static str, Check>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut by_alias = FxHashMap::default();
        let mut by_id = FxHashMap::default();

        for &check in ALL_CHECKS {
            // A duplicate is a mistake in `declare_checks!`, not a runtime
            // condition.
            if by_alias.insert(check.alias(), check).is_some() {
                panic!("check alias `{}` is registered twice", check.alias());
            }
            if by_id.insert(check.id(), check).is_some() {
                panic!("check identifier `{}` is registered twice", check.id());
            }
        }

        Registry { by_alias, by_id }
    })
}

/// Builds the lookup tables if needed. Panics if an alias or identifier is
/// registered twice.
pub(crate) fn ensure_registry() {
    registry();
}

/// Translate one alias to its canonical identifier.
pub fn resolve_alias(alias: &str) -> Result<&'static str, Error> {
    Check::from_alias(alias.trim())
        .map(Check::id)
        .ok_or_else(|| Error::unknown_check(alias.trim()))
}

/// Translate a comma-separated alias list, e.g. `"unused_import,no_exec"`,
/// to canonical identifiers. Empty entries are ignored.
pub fn resolve_aliases(aliases: &str) -> Result<Vec<&'static str>, Error> {
    aliases
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(resolve_alias)
        .collect()
}
