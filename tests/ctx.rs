extern crate reservoir;

use std::io::Read;

use reservoir::prelude::*;

#[test]
fn standalone() {
    let mut ctx = ResourceContext::new("mock");
    assert_eq!(ctx.id(), "mock");
    assert!(!ctx.is_bound());

    let err = ctx.acquire::<String>("a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Access);
    assert_eq!(err.id(), Some("a"));

    let err = ctx.acquire_from_memory::<String>("a", b"a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Access);

    let err = ctx
        .acquire_from_file::<String>("a", "tests/assets/mock.txt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Access);
}

#[test]
fn standalone_files() {
    let ctx = ResourceContext::new("mock");
    assert!(ctx.exists("tests/assets/mock.txt"));
    assert!(!ctx.exists("tests/assets/none.txt"));

    let mut buf = Vec::new();
    ctx.read_to_end("tests/assets/mock.txt", &mut buf).unwrap();
    assert_eq!(buf, b"Hello, World!");

    let mut text = String::new();
    ctx.open("tests/assets/mock.txt")
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "Hello, World!");
}

#[test]
fn standalone_loader() {
    let mut ctx = ResourceContext::new("mock");

    let text = TextLoader::new()
        .load_from_file("tests/assets/mock.txt", &mut ctx)
        .unwrap();
    assert_eq!(text, "Hello, World!");

    let err = TextLoader::new()
        .load_from_file("tests/assets/none.txt", &mut ctx)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IO);
}

#[test]
fn acquire() {
    let mut manager = ResourceManager::new(LoaderFactory::with_defaults());
    manager
        .add_from_memory::<String, _>("dep", b"dependency", None)
        .unwrap();

    let v = manager
        .add_from_deserializer(
            "main",
            |ctx| {
                let dep = ctx.acquire::<String>("dep")?.clone();

                // Cached dependencies are not reloaded from the given source.
                let same = ctx.acquire_from_memory::<String>("dep", b"other")?.clone();
                assert_eq!(dep, same);

                let bytes = ctx.acquire_from_memory::<Vec<u8>>("bytes", b"\x01\x02")?;
                Ok(format!("{}:{}", dep, bytes.len()))
            },
            None,
        )
        .unwrap();

    assert_eq!(v, "dependency:2");
    assert_eq!(manager.find::<Vec<u8>>("bytes").unwrap(), &vec![1, 2]);
}

#[test]
fn files() {
    let mut fs = FileSystem::new();
    let mut memory = Memory::new();
    memory.insert("mock.txt", "in memory");
    fs.mount("memory", memory).unwrap();

    let mut manager = ResourceManager::with_filesystem(LoaderFactory::with_defaults(), fs);
    let v = manager
        .add_from_deserializer(
            "main",
            |ctx| {
                assert!(ctx.is_bound());
                assert!(ctx.exists("mock.txt"));
                assert!(!ctx.exists("tests/assets/mock.txt"));
                ctx.acquire_from_file::<String>("dep", "mock.txt").map(|v| v.clone())
            },
            None,
        )
        .unwrap();

    assert_eq!(v, "in memory");
}
