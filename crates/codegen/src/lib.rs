//! # postbox-codegen
//!
//! Build-script helper that compiles the gateway's protobuf definitions with
//! [poem-grpc-build](https://docs.rs/poem-grpc-build), applying the repository
//! defaults: both client and server stubs are generated, and the file
//! descriptor set is written to `OUT_DIR/descriptors.bin` so the server can
//! embed it for gRPC reflection.

use std::io;
use std::path::PathBuf;

/// Compiles the given proto files into poem-grpc client and server stubs.
///
/// The descriptor set required by the reflection service is emitted alongside
/// the generated code in `OUT_DIR`.
pub fn compile(protos: &[&str], includes: &[&str]) -> io::Result<()> {
    let out_dir =
        PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo for build scripts"));

    poem_grpc_build::Config::new()
        .build_client(true)
        .build_server(true)
        .file_descriptor_set_path(out_dir.join("descriptors.bin"))
        .compile(protos, includes)
}
