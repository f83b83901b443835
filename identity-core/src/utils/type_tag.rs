// identity-core/src/utils/type_tag.rs
//
// Move type tags
//
//   bool | u8 | u16 | u32 | u64 | u128 | u256 | address | signer
//   vector<T>
//   <address>::<module>::<name>[<T1, T2, …>]
//
// Addresses may be written short ("0x2") and always print in full 32-byte form.

use crate::chains::sui::address::SuiAddress;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deepest `vector<…>` / generic nesting accepted by the parser.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Variant order matches the on-chain BCS encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

/// Parse the text form of a type tag.
pub fn parse_type_tag(text: &str) -> Result<TypeTag, ParseError> {
    let mut parser = Parser::new(text);
    let tag = parser.type_tag(0)?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(tag)
}

/// `[A-Za-z_][A-Za-z0-9_]*`, but not a lone `_`.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        Some('_') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl StructTag {
    pub fn new(
        address: SuiAddress,
        module: &str,
        name: &str,
        type_params: Vec<TypeTag>,
    ) -> Result<Self, ParseError> {
        for ident in [module, name] {
            if !is_valid_identifier(ident) {
                return Err(ParseError::TypeTag(format!("invalid identifier '{}'", ident)));
            }
        }
        Ok(Self {
            address,
            module: module.to_string(),
            name: name.to_string(),
            type_params,
        })
    }
}

impl FromStr for TypeTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_tag(s)
    }
}

impl FromStr for StructTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_type_tag(s)? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(ParseError::TypeTag(format!(
                "expected a struct type, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{}", first)?;
            for param in rest {
                write!(f, ", {}", param)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error(&self, what: &str) -> ParseError {
        ParseError::TypeTag(format!("{} at offset {} in '{}'", what, self.pos, self.text))
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    /// Longest run of identifier characters; may be empty.
    fn word(&mut self) -> &'a str {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let word = self.word();
        if !is_valid_identifier(word) {
            self.pos = start;
            return Err(self.error(&format!("invalid identifier '{}'", word)));
        }
        Ok(word.to_string())
    }

    fn type_tag(&mut self, depth: usize) -> Result<TypeTag, ParseError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(self.error("type nesting too deep"));
        }

        self.skip_whitespace();
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") {
            return Ok(TypeTag::Struct(Box::new(self.struct_tag(depth)?)));
        }

        let start = self.pos;
        let tag = match self.word() {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.type_tag(depth + 1)?;
                self.expect(">")?;
                TypeTag::Vector(Box::new(inner))
            }
            other => {
                self.pos = start;
                return Err(self.error(&format!("unknown type '{}'", other)));
            }
        };
        Ok(tag)
    }

    fn struct_tag(&mut self, depth: usize) -> Result<StructTag, ParseError> {
        let address = self.word();
        let address = SuiAddress::from_hex(address)
            .map_err(|e| self.error(&format!("bad address: {}", e)))?;
        self.expect("::")?;
        let module = self.identifier()?;
        self.expect("::")?;
        let name = self.identifier()?;

        let mut type_params = Vec::new();
        if self.eat("<") {
            loop {
                type_params.push(self.type_tag(depth + 1)?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        Ok(StructTag {
            address,
            module,
            name,
            type_params,
        })
    }
}
