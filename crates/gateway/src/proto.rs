//! Generated message and service definitions for `postbox.v1`.

poem_grpc::include_proto!("postbox.v1");

/// Descriptor set embedded for the gRPC reflection service.
pub const FILE_DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/descriptors.bin"));
