use folio::domain::BoundingBox;
use folio::infrastructure::text_processing::PageLinearizer;

fn bbox(x: f32, y: f32) -> BoundingBox {
    BoundingBox::new(x, y, x + 20.0, y + 10.0)
}

#[test]
fn given_spans_on_one_line_when_linearizing_then_inserts_single_separators() {
    let mut linearizer = PageLinearizer::new();
    linearizer.push_span("Hello", bbox(0.0, 0.0));
    linearizer.push_span("world", bbox(30.0, 0.0));
    linearizer.end_line();

    let page = linearizer.finish(1);

    assert_eq!(page.text, "Hello world");
    assert_eq!(page.spans[0].start_offset, 0);
    assert_eq!(page.spans[0].end_offset, 5);
    assert_eq!(page.spans[1].start_offset, 6);
    assert_eq!(page.spans[1].end_offset, 11);
}

#[test]
fn given_span_ending_in_space_when_linearizing_then_adds_no_extra_separator() {
    let mut linearizer = PageLinearizer::new();
    linearizer.push_span("Hello ", bbox(0.0, 0.0));
    linearizer.push_span("world", bbox(30.0, 0.0));
    linearizer.end_line();

    let page = linearizer.finish(1);

    assert_eq!(page.text, "Hello world");
    assert_eq!(page.spans[1].start_offset, 6);
}

#[test]
fn given_multiple_lines_when_linearizing_then_lines_end_with_newline_and_tail_is_trimmed() {
    let mut linearizer = PageLinearizer::new();
    linearizer.push_span("first", bbox(0.0, 0.0));
    linearizer.end_line();
    linearizer.push_span("second", bbox(0.0, 20.0));
    linearizer.end_line();

    let page = linearizer.finish(4);

    assert_eq!(page.page_number, 4);
    assert_eq!(page.text, "first\nsecond");
    assert_eq!(page.spans[1].start_offset, 6);
    assert_eq!(page.spans[1].end_offset, 12);
}

#[test]
fn given_multibyte_spans_when_linearizing_then_offsets_count_characters() {
    let mut linearizer = PageLinearizer::new();
    linearizer.push_span("naïve", bbox(0.0, 0.0));
    linearizer.push_span("café", bbox(30.0, 0.0));
    linearizer.end_line();

    let page = linearizer.finish(1);

    assert_eq!(page.spans[1].start_offset, 6);
    assert_eq!(page.spans[1].end_offset, 10);
    for span in &page.spans {
        assert_eq!(page.span_text(span), span.text);
    }
}

#[test]
fn given_linearized_page_when_checking_offsets_then_spans_are_monotonic_and_in_bounds() {
    let mut linearizer = PageLinearizer::new();
    for (line, words) in [["The", "quick", "brown"], ["fox", "jumps", "over"]]
        .iter()
        .enumerate()
    {
        for (i, word) in words.iter().enumerate() {
            linearizer.push_span(word, bbox(i as f32 * 30.0, line as f32 * 15.0));
        }
        linearizer.end_line();
    }
    assert_eq!(linearizer.span_count(), 6);

    let page = linearizer.finish(1);

    let text_len = page.text.chars().count();
    for pair in page.spans.windows(2) {
        assert!(pair[1].start_offset >= pair[0].end_offset);
    }
    for span in &page.spans {
        assert!(span.end_offset <= text_len);
        assert_eq!(page.span_text(span), span.text);
    }
    assert_eq!(page.text, "The quick brown\nfox jumps over");
}

#[test]
fn given_no_spans_when_finishing_then_page_is_empty() {
    let page = PageLinearizer::new().finish(2);
    assert!(page.text.is_empty());
    assert!(page.spans.is_empty());
}
