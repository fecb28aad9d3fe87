//! AKN → HTML → AKN keeps identities, origins and structure

use crate::common::{akn_to_html, attribute_values, fixture, html_to_akn};
use akn_babel::formats::akn::parse_akn;

#[test]
fn test_round_trip_keeps_ids_and_origins() {
    let source = fixture("unordered_list.xml");
    let back = html_to_akn(&akn_to_html(&source));

    assert_eq!(
        attribute_values(&back, "xml:id"),
        vec!["l1", "i1", "n1", "c1", "m1", "i2", "a1", "c2", "m2", "a2", "c3", "t1", "r1", "r2"]
    );
    assert_eq!(
        attribute_values(&back, "xml:id"),
        attribute_values(&source, "xml:id")
    );
    assert_eq!(attribute_values(&back, "leos:origin"), vec!["ec"]);
    assert_eq!(attribute_values(&back, "leos:editable"), vec!["true"]);
}

#[test]
fn test_round_trip_keeps_structure() {
    let source = fixture("unordered_list.xml");
    let back = html_to_akn(&akn_to_html(&source));
    assert_eq!(
        back,
        "<list xmlns:leos=\"urn:eu:europa:ec:leos\" leos:editable=\"true\" xml:id=\"l1\">\
         <indent xml:id=\"i1\" leos:origin=\"ec\"><num xml:id=\"n1\">-</num>\
         <content xml:id=\"c1\"><mp xml:id=\"m1\">First <b>bold</b> item</mp></content></indent>\
         <indent xml:id=\"i2\"><num>-</num>\
         <alinea xml:id=\"a1\"><content xml:id=\"c2\"><mp xml:id=\"m2\">Intro</mp></content></alinea>\
         <alinea xml:id=\"a2\"><content xml:id=\"c3\"><table xml:id=\"t1\">\
         <tr xml:id=\"r1\"><th><mp>Head</mp></th></tr>\
         <tr xml:id=\"r2\"><td><mp>cell</mp></td></tr>\
         </table></content></alinea></indent></list>"
    );
}

#[test]
fn test_second_round_trip_is_stable() {
    let once = html_to_akn(&akn_to_html(&fixture("unordered_list.xml")));
    let twice = html_to_akn(&akn_to_html(&once));
    assert_eq!(twice, once);
    assert_eq!(parse_akn(&twice).unwrap(), parse_akn(&once).unwrap());
}

#[test]
fn test_paragraphs_round_trip() {
    let source = fixture("numbered_paragraphs.xml");
    let back = html_to_akn(&akn_to_html(&source));
    assert_eq!(
        attribute_values(&back, "xml:id"),
        vec!["p1", "p2", "s1", "s2"]
    );
}
