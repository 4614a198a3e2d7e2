//! Inline `style` attribute editing.

use cssparser::{Delimiter, ParseError, Parser, ParserInput};

use super::{Document, NodeId};

fn skip_rest<'i>(parser: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    while parser.next().is_ok() {}
    Ok(())
}

/// Split a declaration block into `(property, value)` pairs. cssparser's
/// tokenizer keeps `;` inside strings, `url(...)` and blocks intact.
fn split_declarations(style: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut decls = Vec::new();

    while !parser.is_exhausted() {
        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Semicolon, skip_rest);
        if let Some((prop, value)) = parser.slice_from(start).split_once(':') {
            let prop = prop.trim().to_ascii_lowercase();
            if !prop.is_empty() {
                decls.push((prop, value.trim().to_string()));
            }
        }
        // The `;` itself, if any.
        let _ = parser.next();
    }

    decls
}

fn join_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(prop, value)| format!("{}: {};", prop, value))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Document {
    /// Value of one inline style property.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        split_declarations(style)
            .into_iter()
            .find(|(prop, _)| prop == property)
            .map(|(_, value)| value)
    }

    /// Set (`Some`) or remove (`None`) one inline style property.
    ///
    /// An existing declaration keeps its position. The `style` attribute is
    /// dropped once no declarations remain.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: Option<&str>) {
        if self.element(id).is_none() {
            return;
        }
        let mut decls = self
            .attr(id, "style")
            .map(split_declarations)
            .unwrap_or_default();

        match value {
            Some(value) => match decls.iter_mut().find(|(prop, _)| prop == property) {
                Some((_, existing)) => *existing = value.to_string(),
                None => decls.push((property.to_string(), value.to_string())),
            },
            None => decls.retain(|(prop, _)| prop != property),
        }

        if decls.is_empty() {
            self.remove_attr(id, "style");
        } else {
            self.set_attr(id, "style", &join_declarations(&decls));
        }
    }
}
