pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod validate;

use wasm_bindgen::prelude::*;

pub use ast::{SearchStatement, Table};
pub use parser::{ParseError, parse_search_stmt, parse_table_structure, parse_where_sub_stmt};
pub use serializer::format_table;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Canonical form of a structure statement.
#[wasm_bindgen(js_name = "canonicalTableStructure")]
pub fn canonical_table_structure(stmt: &str) -> Result<String, String> {
    serializer::canonicalize(stmt).map_err(|e| e.to_string())
}

/// Whether `stmt` describes the same structure as the stored statement.
#[wasm_bindgen(js_name = "sameTableStructure")]
pub fn same_table_structure(stored: &str, stmt: &str) -> Result<bool, String> {
    let table = parse_table_structure(stmt).map_err(|e| e.to_string())?;
    let changed = serializer::structure_changed(stored, &table).map_err(|e| e.to_string())?;
    Ok(!changed)
}

/// Parse a structure statement into JSON.
#[wasm_bindgen(js_name = "parseTableStructure")]
pub fn parse_table_structure_json(stmt: &str) -> Result<String, String> {
    let table = parse_table_structure(stmt).map_err(|e| e.to_string())?;
    serde_json::to_string(&table).map_err(|e| e.to_string())
}

/// Parse a search statement into JSON.
#[wasm_bindgen(js_name = "parseSearchStatement")]
pub fn parse_search_statement_json(stmt: &str) -> Result<String, String> {
    let search = parse_search_stmt(stmt).map_err(|e| e.to_string())?;
    serde_json::to_string(&search).map_err(|e| e.to_string())
}

/// Split one line into words, honoring single quotes.
#[wasm_bindgen(js_name = "splitLine")]
pub fn split_line(line: &str) -> Result<js_sys::Array, String> {
    let words = lexer::special_split_line(line).map_err(|e| e.to_string())?;
    Ok(words.iter().map(|w| JsValue::from_str(w)).collect())
}
