use crate::error::{MapError, Result};

use super::{LAYER_SLOT, SLOT_SEPARATOR, SOURCE_SLOT};

/// A map template whose marker placeholders have been expanded into slots.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    text: String,
}

impl TemplateDocument {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn source_capacity(&self) -> usize {
        self.text.matches(SOURCE_SLOT).count()
    }

    pub fn layer_capacity(&self) -> usize {
        self.text.matches(LAYER_SLOT).count()
    }

    /// Fill source and layer slots in document order, strip the unused ones and
    /// resolve the fixed `replacements` tokens.
    ///
    /// Slots and tokens are located in a single pass over the template, so text
    /// inside an inserted fragment or replacement is never taken for a slot.
    pub fn fill(
        self,
        replacements: &[(&str, &str)],
        sources: &[String],
        layers: &[String],
    ) -> Result<String> {
        check_capacity("source", self.source_capacity(), sources.len())?;
        check_capacity("layer", self.layer_capacity(), layers.len())?;

        let mut tokens = vec![SOURCE_SLOT, LAYER_SLOT];
        tokens.extend(replacements.iter().map(|(token, _)| *token));

        let mut sources = sources.iter();
        let mut layers = layers.iter();
        let mut filled = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some((index, token_index)) = find_first(rest, &tokens) {
            filled.push_str(&rest[..index]);
            rest = &rest[index + tokens[token_index].len()..];

            let fragment = match token_index {
                0 => sources.next(),
                1 => layers.next(),
                _ => {
                    filled.push_str(replacements[token_index - 2].1);
                    continue;
                }
            };
            let separator = if rest.starts_with(SLOT_SEPARATOR) {
                rest = &rest[SLOT_SEPARATOR.len()..];
                SLOT_SEPARATOR
            } else {
                ""
            };
            if let Some(fragment) = fragment {
                filled.push_str(fragment);
                filled.push_str(separator);
            }
        }
        filled.push_str(rest);
        Ok(filled)
    }
}

/// Replace every occurrence of each token in a single pass over `text`.
pub fn substitute_tokens(text: &str, replacements: &[(&str, &str)]) -> String {
    let tokens: Vec<&str> = replacements.iter().map(|(token, _)| *token).collect();
    let mut substituted = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((index, token_index)) = find_first(rest, &tokens) {
        substituted.push_str(&rest[..index]);
        substituted.push_str(replacements[token_index].1);
        rest = &rest[index + tokens[token_index].len()..];
    }
    substituted.push_str(rest);
    substituted
}

/// Position and index of the earliest token in `text`. Ties go to the token
/// listed first.
fn find_first(text: &str, tokens: &[&str]) -> Option<(usize, usize)> {
    tokens
        .iter()
        .enumerate()
        .filter_map(|(token_index, token)| text.find(token).map(|index| (index, token_index)))
        .min()
}

fn check_capacity(kind: &'static str, capacity: usize, required: usize) -> Result<()> {
    if required > capacity {
        return Err(MapError::SlotOverflow {
            kind,
            capacity,
            required,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{error::MapError, template::loader::expand_markers};

    use super::{substitute_tokens, TemplateDocument};

    fn expanded(source_markers: usize, layer_markers: usize) -> TemplateDocument {
        TemplateDocument::new(expand_markers(
            "<script>\n__SOURCEMARKERS____LAYERMARKERS__</script>",
            "token",
            source_markers,
            layer_markers,
        ))
    }

    #[rstest]
    fn test_fill_strips_unused_slots() {
        let document = expanded(2, 3);
        assert_eq!(2, document.source_capacity());
        assert_eq!(3, document.layer_capacity());

        let filled = document
            .fill(
                &[],
                &["source();".to_string()],
                &["layer_a();".to_string(), "layer_b();".to_string()],
            )
            .unwrap();
        assert_eq!(
            "<script>\nsource();\n\nlayer_a();\n\nlayer_b();\n\n</script>",
            filled
        );
    }

    #[rstest]
    fn test_fill_ignores_slot_text_inside_fragments() {
        let filled = expanded(1, 1)
            .fill(
                &[],
                &["source('__FILLINLAYER__');".to_string()],
                &["layer();".to_string()],
            )
            .unwrap();
        assert_eq!(
            "<script>\nsource('__FILLINLAYER__');\n\nlayer();\n\n</script>",
            filled
        );
    }

    #[rstest]
    fn test_fill_bare_slot_tokens() {
        let document = TemplateDocument::new("a __FILLINSOURCE__ b __FILLINLAYER__ c".to_string());
        let filled = document.fill(&[], &["S".to_string()], &[]).unwrap();
        assert_eq!("a S b  c", filled);
    }

    #[rstest]
    #[case(0, 1, "source")]
    #[case(1, 0, "layer")]
    fn test_fill_overflow(
        #[case] source_markers: usize,
        #[case] layer_markers: usize,
        #[case] expected_kind: &str,
    ) {
        let result = expanded(source_markers, layer_markers)
            .fill(&[], &["source();".to_string()], &["layer();".to_string()]);
        match result {
            Err(MapError::SlotOverflow { kind, .. }) => assert_eq!(expected_kind, kind),
            other => panic!("Expected slot overflow, got {:?}", other),
        }
    }

    #[rstest]
    fn test_fill_replacements_are_not_scanned_for_slots() {
        let document = TemplateDocument::new(
            "<script>\n__SCRIPT__\n__FILLINSOURCE__\n\n__FILLINLAYER__\n\n</script>".to_string(),
        );
        let filled = document
            .fill(
                &[("__SCRIPT__", "ids = ['x__FILLINLAYER___point'];")],
                &["source();".to_string()],
                &["layer();".to_string()],
            )
            .unwrap();
        assert_eq!(
            "<script>\nids = ['x__FILLINLAYER___point'];\nsource();\n\nlayer();\n\n</script>",
            filled
        );
    }

    #[rstest]
    #[case("ids=__IDS__;p=__LABELS__;", "ids=[\"__LABELS___point\"];p=[\"__LABELS__\"];")]
    #[case("p=__LABELS__;ids=__IDS__;", "p=[\"__LABELS__\"];ids=[\"__LABELS___point\"];")]
    #[case("none", "none")]
    fn test_substitute_tokens_single_pass(#[case] text: &str, #[case] expected: &str) {
        let substituted = substitute_tokens(
            text,
            &[
                ("__IDS__", r#"["__LABELS___point"]"#),
                ("__LABELS__", r#"["__LABELS__"]"#),
            ],
        );
        assert_eq!(expected, substituted);
    }
}
