//! Unordered and ordered lists between AKN and HTML

use crate::common::{akn_to_html, fixture, html_to_akn};
use insta::assert_snapshot;

#[test]
fn test_unordered_list_to_html() {
    let html = akn_to_html(&fixture("unordered_list.xml"));
    assert_snapshot!(html, @r#"<ul contenteditable="true" id="l1" data-akn-name="aknUnorderedList"><li id="i1" data-origin="ec" data-akn-num-id="n1" data-akn-num="-" data-akn-content-id="c1" data-akn-mp-id="m1">First <strong>bold</strong> item</li><li id="i2" data-akn-num="-"><p id="a1" data-akn-wrapped-content-id="c2" data-akn-mp-id="m2">Intro</p><table id="t1" data-akn-alinea-id="a2" data-akn-wrapped-content-id="c3"><thead><tr id="r1"><th>Head</th></tr></thead><tbody><tr id="r2"><td><p>cell</p></td></tr></tbody></table></li></ul>"#);
}

#[test]
fn test_inline_item_goes_straight_under_the_unit() {
    let akn = html_to_akn(r#"<ul><li data-akn-num="1">fdsafsa</li></ul>"#);
    assert_eq!(
        akn,
        "<list><indent><num>1</num><content><mp>fdsafsa</mp></content></indent></list>"
    );
}

#[test]
fn test_mixed_item_is_wrapped() {
    let akn = html_to_akn(
        r#"<ul><li data-akn-num="1">fds<strong>af</strong>sa<block>fdasfdsa</block></li></ul>"#,
    );
    assert_eq!(
        akn,
        "<list><indent><num>1</num>\
         <alinea><content><mp>fds<b>af</b>sa</mp></content></alinea>\
         <block>fdasfdsa</block></indent></list>"
    );
}

#[test]
fn test_ordered_list_is_selected_by_marker() {
    let akn = html_to_akn(
        r#"<ol data-akn-name="aknOrderedList" id="l1"><li id="p1" data-akn-num="a)">x</li></ol>"#,
    );
    assert_eq!(
        akn,
        r#"<list xml:id="l1"><point xml:id="p1"><num>a)</num><content><mp>x</mp></content></point></list>"#
    );
}

#[test]
fn test_nested_list_inside_item() {
    let html = akn_to_html(
        r#"<list><indent><num>-</num><content><mp>a</mp></content><list><indent><content><mp>b</mp></content></indent></list></indent></list>"#,
    );
    assert_eq!(
        html,
        r#"<ul data-akn-name="aknUnorderedList"><li data-akn-num="-">a<ul data-akn-name="aknUnorderedList"><li>b</li></ul></li></ul>"#
    );
}

#[test]
fn test_unclaimed_ordered_list_is_copied() {
    let akn = html_to_akn("<ol><li>plain</li></ol>");
    assert_eq!(akn, "<ol><li>plain</li></ol>");
}
