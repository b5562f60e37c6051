//! Prints the structure of BER encoded files.
//!
//! Provide one or more file names. Each file is decoded, printed as an
//! indented tree of values, and encoded again to check that the encoding
//! matches the file’s content. The exit code is non-zero if any file fails
//! to decode or doesn’t survive the round trip.
//!
//! Set `RUST_LOG=trace` to see every header as it is decoded. The binary is
//! only built with the `berdump` feature enabled.

use std::{env, fs, process};
use bertree::{Node, Value};

/// The number of content octets shown for string values.
const MAX_OCTETS: usize = 16;

fn print_node(node: &Node, depth: usize) {
    print!(
        "{:>5}+{:<4} {:indent$}{}",
        node.header_len(), node.total_len() - node.header_len(),
        "", node.ident(),
        indent = depth * 2
    );
    match *node.value() {
        Value::EndOfContents | Value::Null => println!(),
        Value::Boolean(value) => {
            println!(": {}", if value { "TRUE" } else { "FALSE" })
        }
        Value::Integer(ref value) => println!(": {}", value),
        Value::Oid(ref value) => {
            match value.name() {
                Some(name) => println!(": {} ({})", value, name),
                None => println!(": {}", value),
            }
        }
        Value::Text(ref value) => println!(": {:?}", value),
        Value::BitString(ref value) => print_octets(value.as_slice()),
        Value::OctetString(ref value) => print_octets(value),
        Value::Opaque(ref value) => print_octets(value),
        Value::Constructed(ref children) => {
            if node.is_indefinite() {
                println!(" (indefinite)")
            }
            else {
                println!()
            }
            for child in children {
                print_node(child, depth + 1)
            }
        }
    }
}

fn print_octets(octets: &[u8]) {
    print!(":");
    for octet in octets.iter().take(MAX_OCTETS) {
        print!(" {:02X}", octet)
    }
    if octets.len() > MAX_OCTETS {
        print!(" ...")
    }
    println!()
}

fn process_one(path: &str) -> Result<(), String> {
    let data = fs::read(path).map_err(|err| err.to_string())?;
    let node = bertree::parse(data.as_slice()).map_err(|err| {
        err.to_string()
    })?;
    print_node(&node, 0);

    let encoded = node.to_bytes();
    if encoded.as_slice() != &data[..node.total_len()] {
        return Err("re-encoded value differs from the data".into())
    }
    if bertree::parse(encoded).map_err(|err| err.to_string())? != node {
        return Err("re-encoded value decodes differently".into())
    }
    if node.total_len() < data.len() {
        println!(
            "{} trailing octets after the value", data.len() - node.total_len()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let mut failed = false;
    for path in env::args().skip(1) {
        println!("{}:", path);
        if let Err(err) = process_one(&path) {
            eprintln!("{}: {}.", path, err);
            failed = true;
        }
    }
    if failed {
        process::exit(1)
    }
}
