use serde::Serialize;
use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        ///
        /// A reserved word of the language.
        ///
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// All reserved words, in alphabetical order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            ///
            /// Tests a complete identifier run against the reserved words.
            ///
            pub fn from_ident(raw: &str) -> Option<Keyword> {
                match raw {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    AllowUnconnected => "allowunconnected",
    Ask => "ask",
    Bool => "bool",
    Channel => "channel",
    ChannelInterface => "channelinterface",
    Connections => "connections",
    Default => "default",
    Double => "double",
    Exists => "exists",
    Extends => "extends",
    False => "false",
    For => "for",
    Gates => "gates",
    If => "if",
    Import => "import",
    Index => "index",
    Inf => "inf",
    Inout => "inout",
    Input => "input",
    Int => "int",
    Like => "like",
    Match => "match",
    Module => "module",
    ModuleInterface => "moduleinterface",
    Nan => "nan",
    Network => "network",
    Null => "null",
    Nullptr => "nullptr",
    Object => "object",
    Output => "output",
    Package => "package",
    Parameters => "parameters",
    Parent => "parent",
    Property => "property",
    Simple => "simple",
    Sizeof => "sizeof",
    String => "string",
    Submodules => "submodules",
    This => "this",
    True => "true",
    Typename => "typename",
    Types => "types",
    Undefined => "undefined",
    Volatile => "volatile",
    Xml => "xml",
    Xmldoc => "xmldoc",
}

impl Keyword {
    /// Keywords that open a section of a declaration body.
    pub fn is_section(&self) -> bool {
        matches!(
            self,
            Keyword::Parameters
                | Keyword::Gates
                | Keyword::Types
                | Keyword::Submodules
                | Keyword::Connections
        )
    }

    /// Keywords that open a type declaration.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Keyword::Channel
                | Keyword::ChannelInterface
                | Keyword::Simple
                | Keyword::Module
                | Keyword::Network
                | Keyword::ModuleInterface
        )
    }

    /// Keywords usable as a function-style type cast.
    pub fn is_cast(&self) -> bool {
        matches!(
            self,
            Keyword::Bool
                | Keyword::Int
                | Keyword::Double
                | Keyword::String
                | Keyword::Object
                | Keyword::Xml
                | Keyword::Xmldoc
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
