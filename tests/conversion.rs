use smd_oxide::prelude::*;
use std::io::{BufReader, Write};

/// Two triangles over four vertices, groups "hull" at face 0 and "fin" at face 1.
fn sample_mesh() -> Mesh {
    let mut builder = MeshBuilder::new();
    builder.add_vertex([0.0, 0.0, 0.0], [0.0, 0.0]);
    builder.add_vertex([1.0, 0.0, 0.0], [1.0, 0.0]);
    builder.add_vertex([0.0, 1.0, 0.0], [0.0, 1.0]);
    builder.add_vertex([1.0, 2.0, 3.0], [0.5, 0.5]);
    builder.begin_group("hull").add_face([0, 1, 2]);
    builder.begin_group("fin").add_face([2, 1, 3]);
    builder.build().unwrap()
}

fn sample_bytes() -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::new();
    encode(&sample_mesh(), &mut bytes, encode::Config::default()).unwrap();
    bytes
}

fn convert(bytes: Vec<u8>) -> String {
    let mesh = decode(&mut bytes.into_iter(), decode::Config::default()).unwrap();
    let mut out: Vec<u8> = Vec::new();
    write_obj(&mesh, &mut out, obj::Config::default()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn smd_to_obj() {
    let text = convert(sample_bytes());
    let expected = "\
v 0.000000 -0.000000 0.000000
v 1.000000 -0.000000 0.000000
v 0.000000 -0.000000 1.000000
v 1.000000 -3.000000 2.000000
vt 0.0000000 0.0000000
vt 1.0000000 0.0000000
vt 0.0000000 1.0000000
vt 0.5000000 0.5000000
g hull
f 1/1 2/2 3/3
g fin
f 3/3 2/2 4/4
";
    assert_eq!(text, expected);
}

#[test]
fn conversion_is_deterministic() {
    assert_eq!(convert(sample_bytes()), convert(sample_bytes()));
}

#[test]
fn output_parses_as_obj() {
    let text = convert(sample_bytes());
    let mut reader = BufReader::new(text.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions::default(),
        |_| Err(tobj::LoadError::OpenFileFailed),
    ).unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "hull");
    assert_eq!(models[1].name, "fin");
    assert_eq!(models[0].mesh.indices.len(), 3);
    assert_eq!(models[1].mesh.indices.len(), 3);
}

#[test]
fn decode_from_file() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&sample_bytes()).unwrap();
    std::io::Seek::rewind(&mut file).unwrap();

    let mut reader = StreamReader::new(BufReader::new(file));
    let mesh = decode(&mut reader, decode::Config::default()).unwrap();
    assert_eq!(mesh, sample_mesh());
    assert_eq!(reader.position(), sample_bytes().len() as u64);
}

#[test]
fn truncated_file_is_rejected() {
    let bytes = sample_bytes();
    let cut = bytes.len() - 1;
    let mut reader = StreamReader::new(&bytes[..cut]);
    let err = decode(&mut reader, decode::Config::default()).unwrap_err();
    assert!(matches!(
        err,
        decode::Err::VertexReadFailed(decode::vertex::Err::NotEnoughData(ReaderErr::NotEnoughData {
            expected: 128,
            available: 127,
        }))
    ));
}

#[test]
fn half_decoding_matches_reference() {
    for bits in 0..=u16::MAX {
        let ours = F16::from_bits(bits).to_f32();
        let reference = half::f16::from_bits(bits).to_f32();
        if reference.is_nan() {
            assert!(ours.is_nan(), "bits={bits:#06x}");
        } else {
            assert_eq!(ours.to_bits(), reference.to_bits(), "bits={bits:#06x}");
        }
    }
}

#[test]
fn half_encoding_matches_reference_on_exact_values() {
    // values that are exactly representable encode identically, whatever the rounding mode.
    for bits in 0..=u16::MAX {
        let reference = half::f16::from_bits(bits);
        if reference.is_nan() {
            continue;
        }
        let value = reference.to_f32();
        assert_eq!(F16::from_f32(value).to_bits(), half::f16::from_f32(value).to_bits());
        assert_eq!(F16::from_f64(value as f64).to_bits(), half::f16::from_f64(value as f64).to_bits());
    }
}
