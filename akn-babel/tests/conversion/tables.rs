//! Tables, captions and cells

use crate::common::{akn_to_html, html_to_akn};

#[test]
fn test_caption_comes_before_sections() {
    let html = akn_to_html(
        r#"<table xml:id="t"><caption leos:origin="cn">Title</caption><tr><td><mp>a</mp></td></tr></table>"#,
    );
    assert_eq!(
        html,
        r#"<table id="t"><caption data-origin="cn">Title</caption><thead></thead><tbody><tr><td><p>a</p></td></tr></tbody></table>"#
    );
}

#[test]
fn test_sections_are_flattened_to_rows() {
    let akn = html_to_akn(
        r#"<table id="t"><caption data-origin="cn">Title</caption><thead></thead><tbody><tr><td><p>a</p></td></tr></tbody></table>"#,
    );
    assert_eq!(
        akn,
        r#"<table xmlns:leos="urn:eu:europa:ec:leos" xml:id="t"><caption leos:origin="cn">Title</caption><tr><td><mp>a</mp></td></tr></table>"#
    );
}

#[test]
fn test_loose_cell_text_is_grouped_in_mp() {
    let akn = html_to_akn(
        r#"<table border="1"><tbody><tr><th colspan="2">Head <em>x</em></th></tr><tr><td>1</td><td>2</td></tr></tbody></table>"#,
    );
    assert_eq!(
        akn,
        r#"<table border="1"><tr><th colspan="2"><mp>Head <i>x</i></mp></th></tr><tr><td><mp>1</mp></td><td><mp>2</mp></td></tr></table>"#
    );
}

#[test]
fn test_header_rows_go_to_thead() {
    let html = akn_to_html(
        "<table><tr><th>A</th><th>B</th></tr><tr><th>1</th><td>2</td></tr></table>",
    );
    assert_eq!(
        html,
        "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
         <tbody><tr><th>1</th><td>2</td></tr></tbody></table>"
    );
}

#[test]
fn test_list_inside_cell() {
    let html = akn_to_html(
        "<table><tr><td><list><indent><content><mp>x</mp></content></indent></list></td></tr></table>",
    );
    assert_eq!(
        html,
        "<table><thead></thead><tbody><tr><td>\
         <ul data-akn-name=\"aknUnorderedList\"><li>x</li></ul>\
         </td></tr></tbody></table>"
    );
}

#[test]
fn test_space_between_inline_cell_content_is_kept() {
    let html = akn_to_html("<table><tr><td><b>x</b> <i>y</i></td></tr></table>");
    assert_eq!(
        html,
        "<table><thead></thead><tbody><tr><td><strong>x</strong> <em>y</em></td></tr></tbody></table>"
    );

    let akn = html_to_akn(&html);
    assert_eq!(
        akn,
        "<table><tr><td><mp><b>x</b> <i>y</i></mp></td></tr></table>"
    );
}

#[test]
fn test_layout_whitespace_in_cells_and_captions_is_dropped() {
    let html = akn_to_html(
        "<table><caption>\n  <b>A</b> <i>B</i>\n</caption><tr><td>\n  <mp>a</mp>\n  <mp>b</mp>\n</td></tr></table>",
    );
    assert_eq!(
        html,
        "<table><caption><strong>A</strong> <em>B</em></caption><thead></thead>\
         <tbody><tr><td><p>a</p><p>b</p></td></tr></tbody></table>"
    );
}
