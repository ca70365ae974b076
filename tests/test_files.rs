use porter::files::serve_file;

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("porter-files-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_missing_path_is_404() {
    let dir = scratch_dir("missing");

    let (status, _) = serve_file(dir.join("no-such-file"));
    assert_eq!(status, 404);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_directory_is_404() {
    let dir = scratch_dir("dir");

    let (status, _) = serve_file(&dir);
    assert_eq!(status, 404);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_regular_file_is_200_with_bytes() {
    let dir = scratch_dir("file");
    let path = dir.join("hello.txt");
    std::fs::write(&path, b"hello bytes").unwrap();

    let (status, body) = serve_file(&path);
    assert_eq!(status, 200);
    assert_eq!(body, b"hello bytes".to_vec());

    std::fs::remove_dir_all(&dir).unwrap();
}
