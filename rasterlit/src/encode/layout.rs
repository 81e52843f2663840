//! Literal text layout.
//!
//! All four formats emit the same declaration shape: a typed array header,
//! comma-separated zero-padded hex elements wrapped at a per-format width,
//! and a closing `};`. The writer reproduces that layout exactly: elements
//! on one line are separated by `", "`, the separator at a wrap boundary is
//! `",\n  "`, and the final element gets no separator at all.

use std::fmt::Write;

/// Turns an image name into a valid C identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`; a leading digit is
/// prefixed with `_`; an empty name becomes `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() {
        ident.push('_');
    }
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Incremental writer for one array-literal declaration.
pub struct LiteralWriter {
    out: String,
    per_line: usize,
    digits: usize,
    total: usize,
    emitted: usize,
    on_line: usize,
}

impl LiteralWriter {
    /// Starts a declaration.
    ///
    /// # Arguments
    ///
    /// * `name` - Image name; sanitized into the declared identifier
    /// * `elem_type` - C element type, e.g. `"uint16_t"`
    /// * `qualifier` - Optional storage qualifier after `[]` (e.g. `PROGMEM`)
    /// * `per_line` - Elements per line before wrapping
    /// * `digits` - Zero-padded hex width per element
    /// * `total` - Total element count (controls separator placement)
    pub fn new(
        name: &str,
        elem_type: &str,
        qualifier: Option<&str>,
        per_line: usize,
        digits: usize,
        total: usize,
    ) -> Self {
        let ident = sanitize_identifier(name);

        // Header plus roughly one "0x.., " cell per element.
        let mut out = String::with_capacity(64 + total * (digits + 4));
        match qualifier {
            Some(q) => {
                let _ = write!(out, "const {} {}[] {} = {{\n  ", elem_type, ident, q);
            }
            None => {
                let _ = write!(out, "const {} {}[] = {{\n  ", elem_type, ident);
            }
        }

        Self {
            out,
            per_line,
            digits,
            total,
            emitted: 0,
            on_line: 0,
        }
    }

    /// Appends one element literal, inserting the appropriate separator.
    pub fn push(&mut self, value: u32) {
        let _ = write!(self.out, "0x{:0width$x}", value, width = self.digits);

        self.emitted += 1;
        self.on_line += 1;

        if self.on_line >= self.per_line && self.emitted < self.total {
            self.out.push_str(",\n  ");
            self.on_line = 0;
        } else if self.emitted < self.total {
            self.out.push_str(", ");
        }
    }

    /// Closes the declaration and returns the full literal text.
    pub fn finish(mut self) -> String {
        self.out.push_str("\n};");
        self.out
    }
}
