//! gRPC server reflection

use tonic_reflection::server::Builder;
use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

/// Reflection service over the given encoded descriptor sets
pub fn build_reflection(
    file_descriptor_sets: &[&'static [u8]],
) -> Result<ServerReflectionServer<impl ServerReflection>, Box<dyn std::error::Error + Send + Sync>> {
    let mut builder = Builder::configure();
    for fds in file_descriptor_sets {
        builder = builder.register_encoded_file_descriptor_set(*fds);
    }
    Ok(builder.build_v1()?)
}
