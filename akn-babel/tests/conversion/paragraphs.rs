//! Numbered paragraphs and alinea mandates

use crate::common::{akn_to_html, fixture, html_to_akn};

const PARAGRAPHS_HTML: &str = "<article>\n  \
    <ol data-akn-name=\"aknNumberedParagraph\">\
    <li id=\"p1\" data-akn-num=\"1.\">One</li>\
    <li id=\"p2\" data-akn-num=\"2.\"><p id=\"s1\">Two</p><p id=\"s2\">Three</p></li>\
    </ol>\n  \n</article>";

#[test]
fn test_adjacent_paragraphs_share_one_list() {
    let html = akn_to_html(&fixture("numbered_paragraphs.xml"));
    assert_eq!(html, PARAGRAPHS_HTML);
}

#[test]
fn test_paragraph_items_become_sibling_paragraphs() {
    let akn = html_to_akn(PARAGRAPHS_HTML);
    assert_eq!(
        akn,
        "<article>\n  \
         <paragraph xml:id=\"p1\"><num>1.</num><content><mp>One</mp></content></paragraph>\
         <paragraph xml:id=\"p2\"><num>2.</num>\
         <subparagraph xml:id=\"s1\"><content><mp>Two</mp></content></subparagraph>\
         <subparagraph xml:id=\"s2\"><content><mp>Three</mp></content></subparagraph>\
         </paragraph>\n  \n</article>"
    );
}

#[test]
fn test_interrupted_paragraphs_start_a_new_list() {
    let html = akn_to_html(
        "<article><paragraph><content><mp>a</mp></content></paragraph><heading>h</heading>\
         <paragraph><content><mp>b</mp></content></paragraph></article>",
    );
    assert_eq!(
        html,
        "<article><ol data-akn-name=\"aknNumberedParagraph\"><li>a</li></ol>\
         <heading>h</heading>\
         <ol data-akn-name=\"aknNumberedParagraph\"><li>b</li></ol></article>"
    );
}

#[test]
fn test_alinea_mandate_round_trip() {
    let source = r#"<alinea xml:id="al1" leos:origin="cn"><content><mp>Amended text</mp></content></alinea>"#;
    let html = akn_to_html(source);
    assert_eq!(
        html,
        r#"<ol data-akn-name="aknAlineaMandate"><li id="al1" data-origin="cn">Amended text</li></ol>"#
    );
    assert_eq!(
        html_to_akn(&html),
        r#"<alinea xmlns:leos="urn:eu:europa:ec:leos" xml:id="al1" leos:origin="cn"><content><mp>Amended text</mp></content></alinea>"#
    );
}
