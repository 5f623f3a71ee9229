//! gRPC service implementation

use std::sync::Arc;

use nexus_bootstrap::metrics::RequestTimer;
use tonic::{Request, Response, Status};

use super::conversions::*;
use super::proto_converters::*;
use crate::domain::ProductService;
use crate::proto::product_service_server::ProductService as ProductServiceApi;
use crate::proto::*;

const SERVICE: &str = "ProductService";

/// Adapts [`ProductService`] to the generated gRPC trait
pub struct ProductGrpcService {
    service: Arc<dyn ProductService>,
}

impl ProductGrpcService {
    pub fn new(service: Arc<dyn ProductService>) -> Self {
        Self { service }
    }

    async fn get_product_inner(&self, req: GetProductRequest) -> Result<GetProductResponse, Status> {
        let product = self.service.get_product(req.id).await?;
        Ok(GetProductResponse {
            data: Some(product_to_entity(product)),
        })
    }

    async fn list_products_inner(
        &self,
        req: ListProductsRequest,
    ) -> Result<ListProductsResponse, Status> {
        let params = list_request_to_params(req)?;
        let result = self.service.list_products(params).await?.map(product_to_entity);

        Ok(ListProductsResponse {
            pagination: Some(pagination_to_proto(&result)),
            data: result.data,
        })
    }

    async fn create_product_inner(
        &self,
        req: CreateProductRequest,
    ) -> Result<CreateProductResponse, Status> {
        let product = self.service.create_product(create_request_to_new(req)).await?;
        Ok(CreateProductResponse {
            data: Some(product_to_entity(product)),
        })
    }

    async fn get_product_by_pop_id_inner(
        &self,
        req: GetProductByPopIdRequest,
    ) -> Result<GetProductByPopIdResponse, Status> {
        let product = self
            .service
            .get_product_by_pop_id(req.product_on_payment_id)
            .await?;
        Ok(GetProductByPopIdResponse {
            data: Some(product_to_entity(product)),
        })
    }
}

#[tonic::async_trait]
impl ProductServiceApi for ProductGrpcService {
    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "GetProduct");
        let result = self.get_product_inner(request.into_inner()).await;
        timer.finish_with(&result);
        result.map(Response::new)
    }

    async fn list_products(
        &self,
        request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "ListProducts");
        let result = self.list_products_inner(request.into_inner()).await;
        timer.finish_with(&result);
        result.map(Response::new)
    }

    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "CreateProduct");
        let result = self.create_product_inner(request.into_inner()).await;
        timer.finish_with(&result);
        result.map(Response::new)
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<UpdateProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "UpdateProduct");
        let params = update_request_to_params(request.into_inner());
        let result = self
            .service
            .update_product(params)
            .await
            .map(|()| UpdateProductResponse {})
            .map_err(Status::from);
        timer.finish_with(&result);
        result.map(Response::new)
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "DeleteProduct");
        let result = self
            .service
            .delete_product(request.into_inner().id)
            .await
            .map(|()| DeleteProductResponse {})
            .map_err(Status::from);
        timer.finish_with(&result);
        result.map(Response::new)
    }

    async fn get_product_by_pop_id(
        &self,
        request: Request<GetProductByPopIdRequest>,
    ) -> Result<Response<GetProductByPopIdResponse>, Status> {
        let timer = RequestTimer::new(SERVICE, "GetProductByPopId");
        let result = self.get_product_by_pop_id_inner(request.into_inner()).await;
        timer.finish_with(&result);
        result.map(Response::new)
    }
}
