use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    // Common messages first, shared through extern_path
    tonic_build::configure()
        .build_server(false)
        .build_client(false)
        .compile_protos(&["../../proto/common/v1/pagination.proto"], &["../../proto"])?;

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("catalog_product_descriptor.bin"))
        .extern_path(".common.v1", "crate::common::v1")
        .compile_protos(&["../../proto/catalog/product/v1/product.proto"], &["../../proto"])?;

    println!("cargo:rerun-if-changed=migrations");
    Ok(())
}
