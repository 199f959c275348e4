use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn generate_tests() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut dst = File::create(Path::new(&out_dir).join("tests.rs")).unwrap();

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let html_dir = manifest_dir.join("tests").join("html");
    let mut html = fs::read_dir(html_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    html.sort();

    let expectations_path = manifest_dir.join("tests").join("expectations");

    println!("cargo:rerun-if-changed=tests/html");

    for path in html {
        assert_eq!(path.extension().unwrap().to_str().unwrap(), "html");

        let func = path
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap()
            .replace(|c: char| !c.is_alphanumeric(), "_")
            .to_lowercase();
        writeln!(
            dst,
            "test_doc!(doc_{}, {:?}, {:?});",
            func, path, expectations_path,
        )
        .unwrap();
    }
}

fn main() {
    generate_tests();
}
