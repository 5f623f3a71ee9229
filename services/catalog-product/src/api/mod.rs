//! API layer - gRPC service implementation

pub mod conversions;
mod grpc_service;
pub mod proto_converters;

pub use grpc_service::ProductGrpcService;
