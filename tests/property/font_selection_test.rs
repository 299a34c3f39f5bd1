//! Property-based tests for font list deduplication and selection.
//!
//! These tests verify that for arbitrary font lists and toggle sequences the
//! review list holds one entry per full name, toggling is an involution, and
//! the submitted selection is exactly the included entries in list order.

use std::collections::HashSet;

use fontsurvey::managers::font_reviewer::{dedupe_fonts, FontReviewer, FontReviewerTrait};
use fontsurvey::services::document::render_document;
use fontsurvey::services::font_source::StaticFontSource;
use fontsurvey::types::font::RawFontRecord;
use proptest::prelude::*;

/// Full names drawn from a small pool so duplicates are common.
fn arb_raw_fonts() -> impl Strategy<Value = Vec<RawFontRecord>> {
    prop::collection::vec(
        (0..12usize, "[A-Za-z]{1,8}").prop_map(|(n, ps)| {
            RawFontRecord::new(format!("Family {}", n % 4), format!("Font {}", n), ps)
        }),
        0..40,
    )
}

fn reviewing(raw: Vec<RawFontRecord>) -> FontReviewer {
    let mut reviewer = FontReviewer::new("UA/1.0");
    reviewer.collect_fonts(&StaticFontSource::new(raw)).unwrap();
    reviewer
}

// **Property 1: One entry per distinct full name, first occurrence wins**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn dedupe_keeps_first_of_each_full_name(raw in arb_raw_fonts()) {
        let distinct: HashSet<&str> = raw.iter().map(|r| r.full_name.as_str()).collect();
        let fonts = dedupe_fonts(raw.clone());

        prop_assert_eq!(fonts.len(), distinct.len());
        for entry in &fonts {
            let first = raw.iter().find(|r| r.full_name == entry.full_name).unwrap();
            prop_assert_eq!(&entry.postscript_name, &first.postscript_name);
            prop_assert!(entry.included);
        }
    }
}

// **Property 2: Toggling the same index twice restores the list**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn toggle_twice_is_identity(raw in arb_raw_fonts(), pick in 0..40usize) {
        let mut reviewer = reviewing(raw);
        let len = reviewer.fonts().len();
        prop_assume!(len > 0);
        let index = pick % len;
        let before = reviewer.fonts().to_vec();

        reviewer.toggle_inclusion(index).unwrap();
        for (i, (now, was)) in reviewer.fonts().iter().zip(&before).enumerate() {
            if i == index {
                prop_assert_ne!(now.included, was.included);
            } else {
                prop_assert_eq!(now, was);
            }
        }

        reviewer.toggle_inclusion(index).unwrap();
        prop_assert_eq!(reviewer.fonts(), before.as_slice());
    }
}

// **Property 3: The submitted selection is the included entries in order**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn submitted_selection_matches_included(
        raw in arb_raw_fonts(),
        toggles in prop::collection::vec(0..40usize, 0..20),
    ) {
        let mut reviewer = reviewing(raw);
        let len = reviewer.fonts().len();
        if len > 0 {
            for t in toggles {
                reviewer.toggle_inclusion(t % len).unwrap();
            }
        }
        let expected: Vec<String> = reviewer
            .fonts()
            .iter()
            .filter(|f| f.included)
            .map(|f| f.full_name.clone())
            .collect();

        let payload = reviewer.begin_submit(None).unwrap();
        let sent: Vec<String> = payload.fonts().iter().map(|f| f.full_name.clone()).collect();
        prop_assert_eq!(&sent, &expected);

        let doc = render_document(&payload);
        let listed = doc.lines().filter(|l| l.starts_with(" 1. ")).count();
        prop_assert_eq!(listed, expected.len());
    }
}
