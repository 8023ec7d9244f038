use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tco_rs::dump_config::DumpConfig;
use tco_rs::error::TcoError;
use tco_rs::tco_dumper::TcoDumper;

const RGBA8: i32 = 7;
const RG16: i32 = 8;
const R8: i32 = 13;

/// Builds a TCO file around an LZ4-compressed payload.
fn build_tco(flag: u32, layout: i32, width: u32, height: u32, flip_v: bool, pixels: &[u8]) -> Vec<u8> {
    let compressed = lz4_flex::block::compress(pixels);

    let mut data = Vec::new();
    data.extend_from_slice(&flag.to_le_bytes());
    data.extend_from_slice(&[0u8; 8]);
    data.extend_from_slice(&0x18u32.to_le_bytes());
    data.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    data.extend_from_slice(&(pixels.len() as u32).to_le_bytes());

    data.extend_from_slice(&flag.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&layout.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&[flip_v as u8, 0, 0, 0]);

    data.extend_from_slice(&compressed);
    data
}

fn gradient(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}

fn config(input: &Path, output: &Path, threads: usize) -> DumpConfig {
    DumpConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        extension: "tco".to_string(),
        threads: NonZeroUsize::new(threads),
    }
}

fn read_rgba(path: &Path) -> (u32, u32, Vec<u8>) {
    let image = image::open(path).unwrap().into_rgba8();
    let (width, height) = image.dimensions();
    (width, height, image.into_raw())
}

#[test]
fn dumps_good_file_and_reports_bad_ones() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let pixels = gradient(64 * 64 * 4);
    fs::write(input.path().join("good.tco"), build_tco(4, RGBA8, 64, 64, true, &pixels)).unwrap();
    fs::write(input.path().join("bad_flag.tco"), build_tco(3, RGBA8, 64, 64, true, &pixels)).unwrap();
    fs::write(input.path().join("truncated.tco"), &build_tco(4, RGBA8, 64, 64, true, &pixels)[..10]).unwrap();

    let dumper = TcoDumper::open(config(input.path(), output.path(), 2)).unwrap();
    assert_eq!(dumper.files().len(), 3);

    let summary = dumper.run();
    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.written, 1);

    let mut failed: Vec<String> = summary.report.errors().into_iter().map(|e| e.file_name).collect();
    failed.sort();
    assert_eq!(failed, vec!["bad_flag.tco", "truncated.tco"]);

    let written: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(written.len(), 1);

    let (width, height, rgba) = read_rgba(&output.path().join("good.tco.tga"));
    assert_eq!((width, height), (64, 64));
    assert_eq!(rgba.len(), 64 * 64 * 4);
    assert_eq!(rgba, pixels);
}

#[test]
fn clear_flip_flag_writes_rows_bottom_to_top() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let pixels = gradient(8 * 4 * 4);
    fs::write(input.path().join("flipped.tco"), build_tco(4, RGBA8, 8, 4, false, &pixels)).unwrap();

    let summary = TcoDumper::open(config(input.path(), output.path(), 1)).unwrap().run();
    assert!(summary.report.is_empty());

    let (_, _, rgba) = read_rgba(&output.path().join("flipped.tco.tga"));
    let expected: Vec<u8> = pixels.chunks_exact(8 * 4).rev().flatten().copied().collect();
    assert_eq!(rgba, expected);
}

#[test]
fn unsupported_layout_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    fs::write(input.path().join("odd.tco"), build_tco(4, 99, 4, 4, true, &[0u8; 64])).unwrap();

    let summary = TcoDumper::open(config(input.path(), output.path(), 1)).unwrap().run();
    assert_eq!(summary.written, 0);

    let errors = summary.report.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, TcoError::UnsupportedLayout(99).to_string());
    assert!(!output.path().join("odd.tco.tga").exists());
}

#[test]
fn wrong_data_header_size_stops_before_decompression() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut data = build_tco(4, RGBA8, 4, 4, true, &[0u8; 64]);
    data[12..16].copy_from_slice(&0x20u32.to_le_bytes());
    fs::write(input.path().join("resized.tco"), data).unwrap();

    let summary = TcoDumper::open(config(input.path(), output.path(), 1)).unwrap().run();
    let errors = summary.report.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Malformed header"));
}

#[test]
fn empty_files_are_skipped_silently() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    fs::write(input.path().join("empty.tco"), b"").unwrap();

    let summary = TcoDumper::open(config(input.path(), output.path(), 1)).unwrap().run();
    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.written, 0);
    assert!(summary.report.is_empty());
}

#[test]
fn single_and_two_channel_layouts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let grey = gradient(4 * 4);
    fs::write(input.path().join("grey.tco"), build_tco(4, R8, 4, 4, true, &grey)).unwrap();

    let rg16: Vec<u8> = [0u16, 65535].repeat(16).iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(input.path().join("rg.tco"), build_tco(4, RG16, 4, 4, true, &rg16)).unwrap();

    let summary = TcoDumper::open(config(input.path(), output.path(), 2)).unwrap().run();
    assert!(summary.report.is_empty(), "{:?}", summary.report.errors());
    assert_eq!(summary.written, 2);

    let luma = image::open(output.path().join("grey.tco.tga")).unwrap().into_luma8();
    assert_eq!(luma.into_raw(), grey);

    let luma_alpha = image::open(output.path().join("rg.tco.tga")).unwrap().into_luma_alpha8();
    assert!(luma_alpha.pixels().all(|p| p.0 == [0, 255]));
}

#[test]
fn only_matching_extension_is_discovered() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    fs::write(input.path().join("notes.txt"), b"not a texture").unwrap();
    fs::create_dir(input.path().join("nested.tco")).unwrap();
    fs::write(input.path().join("nested.tco").join("inner.tco"), b"ignored").unwrap();

    let dumper = TcoDumper::open(config(input.path(), output.path(), 1)).unwrap();
    assert!(dumper.files().is_empty());
    assert_eq!(dumper.config().extension, "tco");

    let summary = dumper.run();
    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.written, 0);
}

#[test]
fn many_files_over_fewer_workers() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let pixels = gradient(2 * 2 * 4);
    for i in 0..11 {
        fs::write(
            input.path().join(format!("tex_{i:02}.tco")),
            build_tco(4, RGBA8, 2, 2, true, &pixels),
        )
        .unwrap();
    }

    let dumper = TcoDumper::open(config(input.path(), output.path(), 3)).unwrap();
    assert_eq!(dumper.config().worker_count(), 3);
    let names: Vec<_> = dumper.files().iter().map(|file| file.file_name().to_string()).collect();
    assert_eq!(names.first().map(String::as_str), Some("tex_00.tco"));
    assert_eq!(names.last().map(String::as_str), Some("tex_10.tco"));
    assert!(dumper.files().iter().all(|file| file.path().parent() == Some(input.path())));

    let summary = dumper.run();
    assert_eq!(summary.discovered, 11);
    assert_eq!(summary.written, 11);
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 11);
}

#[test]
fn missing_input_directory_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let result = TcoDumper::open(config(&root.path().join("Textures"), &root.path().join("out"), 1));
    assert!(matches!(result, Err(TcoError::Environment(_))));
    assert!(!root.path().join("out").exists());
}

#[test]
fn output_directory_is_created() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("Textures");
    let output = root.path().join("Textures_OUT");
    fs::create_dir(&input).unwrap();

    TcoDumper::open(config(&input, &output, 1)).unwrap();
    assert!(output.is_dir());
}
