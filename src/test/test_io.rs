// RovSim: AS-level routing simulator with Route Origin Validation
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test the collaborators: input parsing and RIB serialisation.

use crate::{
    announcement::Announcement,
    graph::AsGraph,
    io::{read_relationships, read_rov_asns, read_seeds, write_ribs},
    propagation::propagate,
    types::{Asn, SimError},
};

use bzip2::{write::BzEncoder, Compression};
use maplit::btreeset;
use pretty_assertions::assert_eq;

use std::{fs, io::Write, path::PathBuf};

fn write_tmp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn relationship_files_are_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tmp(
        &dir,
        "as-rel2.txt",
        "# inferred relationships\n\
         # as1|as2|rel|source\n\
         1|2|-1|bgp\n\
         2|3|0\n\
         not|a|record\n\
         4|5|-1\n",
    );

    let mut net = AsGraph::new();
    read_relationships(&path, &mut net).unwrap();

    assert_eq!(net.node_count(), 5);
    let n1 = net.node_id(Asn(1)).unwrap();
    let n2 = net.node_id(Asn(2)).unwrap();
    let n3 = net.node_id(Asn(3)).unwrap();
    assert!(net.customers(n1).any(|id| id == n2));
    assert!(net.peers(n2).any(|id| id == n3));
}

#[test]
fn bzip2_relationship_files_are_decompressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("as-rel2.bz2");
    let mut encoder = BzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder
        .write_all(b"# comment\n1|2|-1\n2|5|0\n")
        .unwrap();
    encoder.finish().unwrap();

    let mut net = AsGraph::new();
    read_relationships(&path, &mut net).unwrap();

    assert_eq!(net.node_count(), 3);
    let n2 = net.node_id(Asn(2)).unwrap();
    let n5 = net.node_id(Asn(5)).unwrap();
    assert!(net.peers(n2).any(|id| id == n5));
}

#[test]
fn missing_input_files_are_reported() {
    let mut net = AsGraph::new();
    let err = read_relationships(std::path::Path::new("/nonexistent/as-rel2.txt"), &mut net)
        .unwrap_err();
    assert!(matches!(err, SimError::InputOpen { .. }));
}

#[test]
fn seed_files_are_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tmp(
        &dir,
        "announcements.csv",
        "seed_asn,prefix,rov_invalid\n\
         64501,1.2.0.0/16,true\n\
         64502,10.0.0.0/8,False\n\
         64503,9.9.9.0/24,1\n\
         not-a-number,1.2.3.0/24,true\n",
    );

    let mut net = AsGraph::new();
    let seeded = read_seeds(&path, &mut net).unwrap();

    assert_eq!(seeded, 3);
    let prefix = "1.2.0.0/16".into();
    let entry = net.node(Asn(64501)).unwrap().rib_entry(&prefix).unwrap();
    assert!(entry.rov_invalid);
    assert_eq!(entry.as_path, vec![Asn(64501)]);

    let prefix = "10.0.0.0/8".into();
    assert!(!net.node(Asn(64502)).unwrap().rib_entry(&prefix).unwrap().rov_invalid);
    let prefix = "9.9.9.0/24".into();
    assert!(net.node(Asn(64503)).unwrap().rib_entry(&prefix).unwrap().rov_invalid);
}

#[test]
fn rov_files_are_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tmp(&dir, "rov.txt", "asn\n64501\n64502\n\n64501\n");

    let set = read_rov_asns(&path).unwrap();
    assert_eq!(set, btreeset! {Asn(64501), Asn(64502)});
}

#[test]
fn ribs_are_written_as_quoted_tuples() {
    let mut net = AsGraph::new();
    net.add_relationship(Asn(1), Asn(2), -1);
    net.seed(Asn(1), Announcement::origin(Asn(1), "1.2.0.0/16", false))
        .unwrap();
    propagate(&mut net).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ribs.csv");
    write_ribs(&path, &net).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "asn,prefix,as_path\n\
         1,1.2.0.0/16,\"(1,)\"\n\
         2,1.2.0.0/16,\"(2, 1)\"\n"
    );
}

#[test]
fn rib_output_is_sorted() {
    let mut net = AsGraph::new();
    net.add_relationship(Asn(9), Asn(4), -1);
    net.seed(Asn(9), Announcement::origin(Asn(9), "b.example", false))
        .unwrap();
    net.seed(Asn(9), Announcement::origin(Asn(9), "a.example", false))
        .unwrap();
    propagate(&mut net).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ribs.csv");
    write_ribs(&path, &net).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(
        rows,
        vec![
            "asn,prefix,as_path",
            "4,a.example,\"(4, 9)\"",
            "4,b.example,\"(4, 9)\"",
            "9,a.example,\"(9,)\"",
            "9,b.example,\"(9,)\"",
        ]
    );
}

#[test]
fn empty_ribs_still_produce_a_header() {
    let net = AsGraph::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ribs.csv");
    write_ribs(&path, &net).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "asn,prefix,as_path\n");
}
