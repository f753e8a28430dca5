//! Clip name lists and selector/condition pair lists
//!
//! Sequencer and parametric clips reference other clips through
//! `mClipNameList`; selector and condition-float clips through lists of
//! `SelectorPairData` / `ConditionFloatPairData` structs.

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::text::keywords::{CLIP_NAME, CLIP_TYPES, CONDITION_FLOAT_PAIR, SELECTOR_PAIR};
use crate::text::map_edit::{CLIP_NAMES, CONDITION_FLOAT_PAIRS, SELECTOR_PAIRS};
use crate::text::name::format_f32;
use crate::text::{
    BlockName, BlockSpan, MapProperty, add_entry, format_name_value, list_entries, remove_entry_at,
    remove_entry_named, require,
};

/// Which pair list of a clip to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    /// `mSelectorPairDataList` of a selector clip.
    Selector,
    /// `mConditionFloatPairDataList` of a condition-float clip.
    ConditionFloat,
}

impl PairKind {
    pub fn property(self) -> &'static MapProperty {
        match self {
            PairKind::Selector => &SELECTOR_PAIRS,
            PairKind::ConditionFloat => &CONDITION_FLOAT_PAIRS,
        }
    }
}

fn clip_span(text: &str, clip: &str) -> Result<BlockSpan> {
    require(text, &BlockName::parse(clip)?, &CLIP_TYPES)
}

/// The `mClipNameList` entries of `clip`, as written.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn clip_names(text: &str, clip: &str) -> Result<Vec<String>> {
    let span = clip_span(text, clip)?;
    list_entries(text, span.braces(), &CLIP_NAMES)
}

/// Append `name` to the `mClipNameList` of `clip`, creating the list if needed.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn add_clip_name(text: &str, clip: &str, name: &str, layout: &Layout) -> Result<String> {
    let span = clip_span(text, clip)?;
    add_entry(text, &span, &CLIP_NAMES, &format_name_value(name), layout)
}

/// Remove the first `mClipNameList` entry equal to `name`.
///
/// # Errors
/// Returns [`Error::EntryNotFound`] when the list has no such entry.
pub fn remove_clip_name(text: &str, clip: &str, name: &str) -> Result<String> {
    let span = clip_span(text, clip)?;
    let key = BlockName::parse(name)?;
    remove_entry_named(text, span.braces(), &CLIP_NAMES, &key)?.ok_or_else(|| {
        Error::EntryNotFound {
            property: CLIP_NAMES.name.to_string(),
            entry: key.literal(),
        }
    })
}

fn pair_entry(item_type: &str, target: &str, value_field: &str, value: f32) -> String {
    format!(
        "{item_type} {{\n    {CLIP_NAME}: hash = {}\n    {value_field}: f32 = {}\n}}",
        format_name_value(target),
        format_f32(value)
    )
}

/// Append a `SelectorPairData` for `target` to a selector clip.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn add_selector_pair(
    text: &str,
    clip: &str,
    target: &str,
    probability: f32,
    layout: &Layout,
) -> Result<String> {
    let span = clip_span(text, clip)?;
    let entry = pair_entry(SELECTOR_PAIR, target, "mProbability", probability);
    add_entry(text, &span, &SELECTOR_PAIRS, &entry, layout)
}

/// Append a `ConditionFloatPairData` for `target` to a condition-float clip.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn add_condition_float_pair(
    text: &str,
    clip: &str,
    target: &str,
    value: f32,
    layout: &Layout,
) -> Result<String> {
    let span = clip_span(text, clip)?;
    let entry = pair_entry(CONDITION_FLOAT_PAIR, target, "mValue", value);
    add_entry(text, &span, &CONDITION_FLOAT_PAIRS, &entry, layout)
}

/// The pair structs of `clip`, in order.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn list_pairs(text: &str, clip: &str, kind: PairKind) -> Result<Vec<String>> {
    let span = clip_span(text, clip)?;
    list_entries(text, span.braces(), kind.property())
}

/// Remove the pair at `index`.
///
/// # Errors
/// Returns [`Error::EntryIndexOutOfRange`] when there is no such pair.
pub fn remove_pair(text: &str, clip: &str, kind: PairKind, index: usize) -> Result<String> {
    let span = clip_span(text, clip)?;
    remove_entry_at(text, span.braces(), kind.property(), index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SELECTOR: &str = "            \"Pick\" = SelectorClipData {
                mSelectorPairDataList: list[embed] = {
                    SelectorPairData {
                        mClipName: hash = \"Attack1\"
                        mProbability: f32 = 0.5
                    }
                }
            }
";

    #[test]
    fn test_clip_name_list_add_and_remove() {
        let text = "\"Combo\" = SequencerClipData {
    mClipNameList: list[hash] = {
        \"Attack1\"
    }
}
";
        let layout = Layout::default();
        let out = add_clip_name(text, "Combo", "Attack2", &layout).unwrap();
        let out = add_clip_name(&out, "Combo", "0xDEADBEEF", &layout).unwrap();
        assert_eq!(
            clip_names(&out, "Combo").unwrap(),
            vec!["\"Attack1\"", "\"Attack2\"", "0xDEADBEEF"]
        );

        let out = remove_clip_name(&out, "Combo", "Attack1").unwrap();
        assert_eq!(clip_names(&out, "Combo").unwrap(), vec!["\"Attack2\"", "0xDEADBEEF"]);

        assert!(matches!(
            remove_clip_name(&out, "Combo", "Attack1"),
            Err(Error::EntryNotFound { .. })
        ));
    }

    #[test]
    fn test_add_selector_pair() {
        let out = add_selector_pair(SELECTOR, "Pick", "Attack2", 0.25, &Layout::default()).unwrap();
        assert_eq!(
            out,
            "            \"Pick\" = SelectorClipData {
                mSelectorPairDataList: list[embed] = {
                    SelectorPairData {
                        mClipName: hash = \"Attack1\"
                        mProbability: f32 = 0.5
                    },
                    SelectorPairData {
                        mClipName: hash = \"Attack2\"
                        mProbability: f32 = 0.25
                    }
                }
            }
"
        );
    }

    #[test]
    fn test_add_selector_pair_to_empty_list() {
        let text = "\"Pick\" = SelectorClipData {\n    mSelectorPairDataList: list[embed] = {\n    }\n}\n";
        let out = add_selector_pair(text, "Pick", "Attack1", 1.0, &Layout::default()).unwrap();
        assert_eq!(out.matches(',').count(), 0);
        assert_eq!(
            out,
            "\"Pick\" = SelectorClipData {
    mSelectorPairDataList: list[embed] = {
        SelectorPairData {
            mClipName: hash = \"Attack1\"
            mProbability: f32 = 1
        }
    }
}
"
        );
    }

    #[test]
    fn test_condition_pair_synthesized_and_removed() {
        let text = "\"Cond\" = ConditionFloatClipData {
    mFlags: u32 = 0
}
";
        let layout = Layout::default();
        let out = add_condition_float_pair(text, "Cond", "Slow", 0.0, &layout).unwrap();
        let out = add_condition_float_pair(&out, "Cond", "Fast", 1.5, &layout).unwrap();
        let pairs = list_pairs(&out, "Cond", PairKind::ConditionFloat).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs[1].contains("mValue: f32 = 1.5"));
        assert_eq!(out.matches(',').count(), 1);

        let out = remove_pair(&out, "Cond", PairKind::ConditionFloat, 0).unwrap();
        assert_eq!(out.matches(',').count(), 0);
        let pairs = list_pairs(&out, "Cond", PairKind::ConditionFloat).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].contains("\"Fast\""));
    }

    #[test]
    fn test_missing_clip() {
        assert!(matches!(
            add_selector_pair(SELECTOR, "Other", "A", 1.0, &Layout::default()),
            Err(Error::BlockNotFound { .. })
        ));
    }
}
