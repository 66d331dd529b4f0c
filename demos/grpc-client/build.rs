fn main() -> std::io::Result<()> {
    postbox_codegen::compile(&["../../crates/gateway/proto/postbox.proto"], &["../../crates/gateway/proto"])
}
