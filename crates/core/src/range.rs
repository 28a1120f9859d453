//! Turning a selection into a concrete slide range.

use crate::error::Result;
use crate::types::{SectionTable, SelectionRequest, SlideRange};

/// Resolve a selection into an inclusive slide range.
///
/// Explicit ranges are not checked against the deck's slide count; indices
/// past the end show up later as missing sources. A missing section table is
/// treated as an empty one.
///
/// A section resolves to `first_slide..=first_slide + slide_count`, which
/// reaches one slide past the section's last slide.
pub fn resolve(selection: &SelectionRequest, sections: Option<&SectionTable>) -> Result<SlideRange> {
    match *selection {
        SelectionRequest::ExplicitRange { from, to } => SlideRange::new(from, to.unwrap_or(from)),
        SelectionRequest::SingleSlide { index } => Ok(SlideRange::single(index)),
        SelectionRequest::Section { index } => {
            let empty = SectionTable::new();
            let section = sections.unwrap_or(&empty).section(index)?;
            log::debug!(
                "Section {} ({:?}) starts at slide {} with {} slides",
                index,
                section.name,
                section.first_slide,
                section.slide_count
            );
            SlideRange::new(
                section.first_slide,
                section.first_slide.saturating_add(section.slide_count),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Section;

    fn table() -> SectionTable {
        vec![Section::new("Intro", 1, 3), Section::new("Body", 4, 5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_explicit_range() {
        let sel = SelectionRequest::ExplicitRange {
            from: 2,
            to: Some(4),
        };
        let range = resolve(&sel, None).unwrap();
        assert_eq!((range.first(), range.last()), (2, 4));
    }

    #[test]
    fn test_explicit_range_defaults_to_from() {
        let sel = SelectionRequest::ExplicitRange { from: 6, to: None };
        let range = resolve(&sel, None).unwrap();
        assert_eq!((range.first(), range.last()), (6, 6));
    }

    #[test]
    fn test_explicit_range_is_not_bounds_checked() {
        let sel = SelectionRequest::ExplicitRange {
            from: 90,
            to: Some(120),
        };
        let range = resolve(&sel, Some(&table())).unwrap();
        assert_eq!(range.len(), 31);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let sel = SelectionRequest::ExplicitRange {
            from: 4,
            to: Some(2),
        };
        assert!(matches!(
            resolve(&sel, None),
            Err(Error::InvalidRange { from: 4, to: 2 })
        ));
    }

    #[test]
    fn test_single_slide() {
        let range = resolve(&SelectionRequest::SingleSlide { index: 3 }, None).unwrap();
        assert_eq!((range.first(), range.last()), (3, 3));
    }

    #[test]
    fn test_section_bounds_include_one_past_end() {
        let range = resolve(&SelectionRequest::Section { index: 1 }, Some(&table())).unwrap();
        assert_eq!((range.first(), range.last()), (4, 9));
    }

    #[test]
    fn test_section_out_of_range() {
        let sections: SectionTable = vec![Section::new("Only", 1, 3)].into_iter().collect();
        let err = resolve(&SelectionRequest::Section { index: 1 }, Some(&sections)).unwrap_err();
        assert!(err.to_string().contains("1 section available"));
    }

    #[test]
    fn test_section_without_table() {
        let err = resolve(&SelectionRequest::Section { index: 0 }, None).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionOutOfRange {
                index: 0,
                available: 0
            }
        ));
    }
}
