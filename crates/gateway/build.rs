fn main() -> std::io::Result<()> {
    postbox_codegen::compile(&["proto/postbox.proto"], &["proto"])
}
