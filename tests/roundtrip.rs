extern crate iconpack;
extern crate tempfile;

use iconpack::chunk;
use iconpack::{decode_icns, decode_ico, encode_icns, encode_ico,
               ContainerFormat, DecodedEntry, Error, ExportOptions,
               IconElement, IconFamily, IconPack, Image, LoadOptions, OSType,
               Platform, ScaleAlgorithm, Selection};

#[test]
fn ico_round_trip_windows() {
    let pack = filled_pack(Platform::Windows);
    let data = encode_ico(pack.slots(), &ExportOptions::default()).unwrap();
    let entries = decode_ico(&data).unwrap();
    assert_entries_match_pack(&entries, &pack);
}

#[test]
fn ico_round_trip_favicon() {
    let pack = filled_pack(Platform::Favicon);
    let data = encode_ico(pack.slots(), &ExportOptions::default()).unwrap();
    let entries = decode_ico(&data).unwrap();
    assert_entries_match_pack(&entries, &pack);
}

#[test]
fn icns_round_trip_macos() {
    let pack = filled_pack(Platform::MacOs);
    let data = encode_icns(pack.slots(), &ExportOptions::default()).unwrap();
    let entries = decode_icns(&data).unwrap();
    assert_entries_match_pack(&entries, &pack);
}

#[test]
fn icns_uses_canonical_ostypes() {
    let pack = filled_pack(Platform::MacOs);
    let data = encode_icns(pack.slots(), &ExportOptions::default()).unwrap();
    let family = IconFamily::read(&data[..], 64).unwrap();
    let ostypes: Vec<String> = family.elements
        .iter()
        .map(|element| element.ostype.to_string())
        .collect();
    assert_eq!(ostypes,
               ["ic10", "ic14", "ic13", "ic07", "ic12", "SB24", "ic11",
                "icp4"]);
    assert_eq!(family.total_length() as usize, data.len());
}

#[test]
fn text_is_dropped_without_embedding() {
    let pack = filled_pack(Platform::Windows);
    let options = ExportOptions { embed_text: false };
    let entries = decode_ico(&encode_ico(pack.slots(), &options).unwrap())
        .unwrap();
    assert_eq!(entries.len(), pack.len());
    assert!(entries.iter().all(|entry| entry.text.is_empty()));
}

#[test]
fn icns_hello_ic11() {
    let png = chunk::write_text(pattern(32).to_png_bytes().unwrap(), "hello")
        .unwrap();
    let mut family = IconFamily::new();
    family.elements.push(IconElement::new(OSType(*b"ic11"), png));
    let mut data = Vec::new();
    family.write(&mut data).unwrap();

    let entries = decode_icns(&data).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].size, 32);
    assert_eq!(entries[0].text, "hello");
    assert_eq!(entries[0].image, pattern(32));
}

#[test]
fn truncated_ico_directory() {
    let pack = filled_pack(Platform::Windows);
    let data = encode_ico(pack.slots(), &ExportOptions::default()).unwrap();
    // Claim three images, but keep only two directory records.
    let mut truncated = data[..6 + 32].to_vec();
    truncated[4] = 3;
    truncated[5] = 0;
    match decode_ico(&truncated) {
        Err(Error::TruncatedFile { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn load_generate_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("logo.png");
    let source = chunk::write_text(pattern(256).to_png_bytes().unwrap(),
                                   "logo")
        .unwrap();
    std::fs::write(&source_path, &source).unwrap();

    let mut pack = IconPack::new(Platform::Windows);
    let entries = iconpack::load_file(&source_path, &LoadOptions::default())
        .unwrap();
    assert_eq!(iconpack::reconcile(&mut pack, entries).unwrap(), 1);
    let generated = iconpack::generate_missing(&mut pack,
                                               Selection::AllMissing,
                                               ScaleAlgorithm::Bicubic)
        .unwrap();
    assert_eq!(generated, 7);

    let ico_path = dir.path().join("logo.ico");
    iconpack::save_file(&ico_path,
                        ContainerFormat::Ico,
                        pack.slots(),
                        &ExportOptions::default())
        .unwrap();
    let entries = iconpack::load_file(&ico_path, &LoadOptions::default())
        .unwrap();
    assert_entries_match_pack(&entries, &pack);
    assert_eq!(entries[0].text, "logo");

    // Load the icon file back into a fresh pack for another platform.
    let mut android = IconPack::new(Platform::Android);
    let filled = iconpack::reconcile(&mut android, entries).unwrap();
    // The sizes both platforms share: 96, 64, 48, 32, 24 and 16.
    assert_eq!(filled, 6);
    assert_eq!(android.valid_count(), 6);
}

#[test]
fn nothing_is_written_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.icns");
    let pack = IconPack::new(Platform::MacOs);
    let result = iconpack::save_file(&path,
                                     ContainerFormat::Icns,
                                     pack.slots(),
                                     &ExportOptions::default());
    assert!(matches!(result, Err(Error::NothingToExport)));
    assert!(!path.exists());
}

#[test]
fn file_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.ico");
    std::fs::write(&path, vec![0u8; 4096]).unwrap();
    let options = LoadOptions {
        max_file_size: 1024,
        ..LoadOptions::default()
    };
    match iconpack::load_file(&path, &options) {
        Err(Error::FileTooLarge { size: 4096, limit: 1024 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn kind_sniffed_from_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.dat");
    let pack = filled_pack(Platform::MacOs);
    let data = encode_icns(pack.slots(), &ExportOptions::default()).unwrap();
    std::fs::write(&path, &data).unwrap();
    let entries = iconpack::load_file(&path, &LoadOptions::default())
        .unwrap();
    assert_eq!(entries.len(), 8);
}

/// Builds a pack whose every slot holds a distinct image and some text.
fn filled_pack(platform: Platform) -> IconPack {
    let mut pack = IconPack::new(platform);
    for index in 0..pack.len() {
        let size = pack.slots()[index].size();
        let text = format!("icon {}", size);
        pack.assign_slot(index, pattern(size), &text).unwrap();
    }
    pack
}

/// A deterministic, non-uniform test image.
fn pattern(size: u32) -> Image {
    let mut image = Image::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let rgba = [(x * 7 % 256) as u8,
                        (y * 13 % 256) as u8,
                        ((x + y) % 256) as u8,
                        (255 - (x ^ y) % 128) as u8];
            image.set_pixel(x, y, rgba);
        }
    }
    image
}

fn assert_entries_match_pack(entries: &[DecodedEntry], pack: &IconPack) {
    let valid: Vec<_> = pack.slots()
        .iter()
        .filter(|slot| slot.is_valid())
        .collect();
    assert_eq!(entries.len(), valid.len());
    for (entry, slot) in entries.iter().zip(valid) {
        assert_eq!(entry.size, slot.size());
        assert_eq!(entry.text, slot.text());
        assert!(entry.image == *slot.image());
    }
}
