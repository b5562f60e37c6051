//! Round trips of real and hand-made data.

use std::fs::File;
use bertree::{
    Class, Decoder, ErrorKind, Mode, Node, Oid, Tag, Value, parse,
    parse_reader
};
use hex_literal::hex;

static CERT: &[u8] = include_bytes!("data/root-ca.der");

fn cert() -> Node {
    parse(CERT).unwrap()
}

fn error_kind(data: &[u8]) -> ErrorKind {
    parse(data).unwrap_err().kind()
}


//------------ DER certificate -----------------------------------------------

#[test]
fn certificate_round_trip() {
    let node = cert();
    assert_eq!(node.header_len(), 4);
    assert_eq!(node.total_len(), CERT.len());
    assert_eq!(node.encoded_len(), CERT.len());
    assert_eq!(node.to_bytes(), CERT);
    assert_eq!(parse(node.to_bytes()).unwrap(), node);
}

#[test]
fn certificate_as_der() {
    let der = Decoder::new(Mode::Der).decode(CERT).unwrap();
    assert_eq!(der, cert());
}

#[test]
fn certificate_from_reader() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/root-ca.der");
    let node = parse_reader(File::open(path).unwrap()).unwrap();
    assert_eq!(node, cert());
}

#[test]
fn certificate_content() {
    let node = cert();
    assert_eq!(node.tag(), Tag::SEQUENCE);
    assert_eq!(node.children().len(), 3);

    let tbs = &node.children()[0];
    assert_eq!(tbs.header_len(), 4);
    assert_eq!(tbs.total_len(), 639);
    assert_eq!(tbs.children().len(), 8);

    // version [0] EXPLICIT INTEGER
    let version = &tbs.children()[0];
    assert_eq!(version.class(), Class::Context);
    assert!(version.is_constructed());
    assert_eq!(
        version.children()[0].as_integer().unwrap().to_i64(), Some(2)
    );

    // A serial number too large for any native integer.
    let serial = tbs.children()[1].as_integer().unwrap();
    assert_eq!(
        serial.as_slice(),
        hex!("2F209AB27AE7E7CCEE283EB3B7FEC46C14B63CE8")
    );
    assert!(!serial.is_negative());
    assert_eq!(serial.to_i128(), None);

    let alg = tbs.children()[2].children()[0].as_oid().unwrap();
    assert_eq!(alg, &"1.2.840.113549.1.1.11".parse::<Oid>().unwrap());
    assert_eq!(alg.name(), Some("sha256WithRSAEncryption"));
    assert_eq!(tbs.children()[2].children()[1].value(), &Value::Null);

    // issuer: C, O, CN, emailAddress
    let issuer = &tbs.children()[3];
    assert_eq!(issuer.children().len(), 4);
    let country = &issuer.children()[0].children()[0];
    assert_eq!(country.children()[1].tag(), Tag::PRINTABLE_STRING);
    assert_eq!(country.children()[1].as_str(), Some("NL"));
    let common_name = &issuer.children()[2].children()[0];
    assert_eq!(
        common_name.children()[0].as_oid().and_then(Oid::name),
        Some("commonName")
    );
    assert_eq!(common_name.children()[1].tag(), Tag::UTF8_STRING);
    assert_eq!(common_name.children()[1].as_str(), Some("Test Root CA 1"));
    let email = &issuer.children()[3].children()[0];
    assert_eq!(email.children()[1].tag(), Tag::IA5_STRING);
    assert_eq!(email.children()[1].as_str(), Some("ca@example.org"));

    let validity = &tbs.children()[4];
    assert_eq!(validity.children()[0].tag(), Tag::UTC_TIME);
    assert_eq!(validity.children()[0].as_str(), Some("261016020526Z"));

    let key = &tbs.children()[6].children()[1];
    assert_eq!(key.tag(), Tag::BIT_STRING);
    assert_eq!(key.header_len(), 4);
    assert_eq!(key.total_len(), 275);
    assert_eq!(key.as_bytes().unwrap()[0], 0);

    // extensions [3] EXPLICIT, the last one is basicConstraints.
    let extensions = &tbs.children()[7];
    assert_eq!(extensions.tag(), Tag::ctx(3));
    let basic = &extensions.children()[0].children()[2];
    assert_eq!(
        basic.children()[0].as_oid().and_then(Oid::name),
        Some("basicConstraints")
    );
    assert_eq!(basic.children()[1].as_bool(), Some(true));
    assert_eq!(basic.children()[2].as_bytes(), Some(&hex!("30030101FF")[..]));
}

#[test]
fn modified_certificate() {
    let mut node = cert();
    let tbs = &mut node.children_mut().unwrap()[0];
    let extensions = &mut tbs.children_mut().unwrap()[7];
    let seq = &mut extensions.children_mut().unwrap()[0];
    let ski = &mut seq.children_mut().unwrap()[0];
    let octets = ski.children_mut().unwrap()[1].octets_mut().unwrap();
    octets.extend_from_slice(b"\x00\x00");

    assert_eq!(node.total_len(), CERT.len() + 2);
    let encoded = node.to_bytes();
    assert_eq!(encoded.len(), CERT.len() + 2);
    let reparsed = parse(encoded).unwrap();
    assert_eq!(reparsed, node);
    assert_ne!(reparsed, cert());
}

#[test]
fn truncated_certificate() {
    assert_eq!(error_kind(&CERT[..CERT.len() - 1]), ErrorKind::TruncatedInput);
    assert_eq!(error_kind(&CERT[..3]), ErrorKind::BadLength);
}


//------------ BER indefinite length -----------------------------------------

#[test]
fn indefinite_round_trip() {
    let data = hex!(
        "30 80 02 01 05 24 80 04 02 AB CD 04 01 EF 00 00 00 00"
    );
    let node = parse(&data).unwrap();
    assert!(node.is_indefinite());
    assert_eq!(node.total_len(), data.len());
    assert_eq!(node.children().len(), 3);
    assert!(node.children()[2].is_end_of_contents());

    let octets = &node.children()[1];
    assert_eq!(octets.ident().tag(), Tag::OCTET_STRING);
    assert!(octets.is_constructed());
    assert!(octets.is_indefinite());
    assert_eq!(octets.total_len(), 11);
    assert_eq!(octets.children()[1].as_bytes(), Some(&[0xEF][..]));

    assert_eq!(node.to_bytes(), data);
}

#[test]
fn mixed_lengths_round_trip() {
    let data = hex!("30 09 30 80 05 00 00 00 01 01 00");
    let node = parse(&data).unwrap();
    assert!(!node.is_indefinite());
    assert!(node.children()[0].is_indefinite());
    assert_eq!(node.children()[0].total_len(), 6);
    assert_eq!(node.to_bytes(), data);
}

#[test]
fn indefinite_without_end_of_contents() {
    let node = parse(&hex!("30 80 05 00 00 00")).unwrap();
    let mut stripped = node.clone();
    stripped.children_mut().unwrap().pop();
    assert_eq!(stripped.to_bytes(), hex!("30 80 05 00"));
    assert_ne!(stripped.to_bytes(), node.to_bytes());
}

#[test]
fn built_indefinite() {
    let node = Node::sequence(vec![
        Node::integer(5),
        Node::text(Tag::IA5_STRING, "x").unwrap()
    ]).into_indefinite().unwrap();
    let data = node.to_bytes();
    assert_eq!(data, hex!("30 80 02 01 05 16 01 78 00 00"));
    assert_eq!(parse(&data).unwrap(), node);
}


//------------ Malformed data ------------------------------------------------

#[test]
fn malformed() {
    assert_eq!(error_kind(&hex!("30 84 00 00 01")), ErrorKind::BadLength);
    assert_eq!(error_kind(&hex!("02")), ErrorKind::TruncatedHeader);
    assert_eq!(error_kind(&hex!("1F")), ErrorKind::TruncatedHeader);
    assert_eq!(
        error_kind(&hex!("30 80 02 01 05")),
        ErrorKind::UnterminatedIndefiniteObject
    );
    assert_eq!(
        error_kind(&hex!("30 04 02 01 05 05")), ErrorKind::TruncatedObject
    );
    assert_eq!(error_kind(&hex!("04 03 AB")), ErrorKind::TruncatedInput);
    assert_eq!(
        error_kind(&hex!("01 02 00 00")),
        ErrorKind::InvalidValue("boolean content must be one octet")
    );
}

#[test]
fn hostile_nesting() {
    let data = hex!("30 80").repeat(1_000_000);
    assert_eq!(error_kind(&data), ErrorKind::NestingTooDeep);

    let err = Decoder::new(Mode::Ber).with_max_depth(4).decode(
        &hex!("30 0A 30 08 30 06 30 04 30 02 05 00")
    ).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    assert_eq!(usize::from(err.pos()), 10);
}
