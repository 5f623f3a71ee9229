//! End-to-end tests: generated client against the gRPC server backed by the
//! in-memory repository.

use std::net::SocketAddr;
use std::sync::Arc;

use catalog_product::api::ProductGrpcService;
use catalog_product::application::ProductCatalog;
use catalog_product::common::v1::PaginationRequest;
use catalog_product::domain::ProductRepository;
use catalog_product::infrastructure::persistence::InMemoryProductRepository;
use catalog_product::proto::product_service_client::ProductServiceClient;
use catalog_product::proto::product_service_server::ProductServiceServer;
use catalog_product::proto::*;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::Code;
use tonic::transport::{Channel, Server};

struct TestServer {
    repository: Arc<InMemoryProductRepository>,
    client: ProductServiceClient<Channel>,
}

async fn start() -> TestServer {
    let repository = Arc::new(InMemoryProductRepository::new());
    let catalog = Arc::new(ProductCatalog::new(repository.clone()));
    let service = ProductGrpcService::new(catalog);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(ProductServiceServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    let client = ProductServiceClient::connect(format!("http://{}", addr))
        .await
        .unwrap();

    TestServer { repository, client }
}

fn create_request(product_model_id: i64, quantity: i64, metadata: &str) -> CreateProductRequest {
    CreateProductRequest {
        product_model_id,
        quantity,
        add_price: 1000,
        is_active: true,
        can_combine: false,
        metadata: metadata.as_bytes().to_vec(),
        resources: vec!["front.png".to_string(), "back.png".to_string()],
    }
}

#[tokio::test]
async fn test_create_then_get() {
    let mut server = start().await;

    let created = server
        .client
        .create_product(create_request(3, 12, r#"{"color":"red"}"#))
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.sold, 0);

    let fetched = server
        .client
        .get_product(GetProductRequest { id: created.id })
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.resources, vec!["front.png", "back.png"]);
    assert_eq!(fetched.metadata, br#"{"color":"red"}"#.to_vec());
}

#[tokio::test]
async fn test_get_missing_product_is_not_found() {
    let mut server = start().await;

    let status = server
        .client
        .get_product(GetProductRequest { id: 404 })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "product 404");
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let mut server = start().await;

    let status = server
        .client
        .create_product(create_request(3, -1, ""))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = server
        .client
        .create_product(create_request(3, 1, "not json"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_list_pagination_and_filters() {
    let mut server = start().await;

    for quantity in 1..=5 {
        let model = if quantity % 2 == 0 { 7 } else { 8 };
        server
            .client
            .create_product(create_request(model, quantity, r#"{"tier":"basic"}"#))
            .await
            .unwrap();
    }

    // no pagination message: defaults apply
    let all = server
        .client
        .list_products(ListProductsRequest::default())
        .await
        .unwrap()
        .into_inner();
    assert_eq!(all.data.len(), 5);
    let pagination = all.pagination.unwrap();
    assert_eq!((pagination.page, pagination.limit, pagination.total), (1, 20, 5));
    assert_eq!(pagination.next_page, None);

    let page = server
        .client
        .list_products(ListProductsRequest {
            pagination: Some(PaginationRequest { page: 2, limit: 2 }),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();
    let ids: Vec<i64> = page.data.iter().map(|p| p.quantity).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(page.pagination.unwrap().next_page, Some(3));

    let filtered = server
        .client
        .list_products(ListProductsRequest {
            product_model_id: Some(7),
            quantity_from: Some(3),
            metadata: Some(br#"{"tier":"basic"}"#.to_vec()),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(filtered.data.len(), 1);
    assert_eq!(filtered.data[0].quantity, 4);
    assert_eq!(filtered.pagination.unwrap().total, 1);
}

#[tokio::test]
async fn test_update_applies_only_present_fields() {
    let mut server = start().await;

    let created = server
        .client
        .create_product(create_request(3, 10, r#"{"a":1}"#))
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();

    server
        .client
        .update_product(UpdateProductRequest {
            id: created.id,
            sold: Some(4),
            is_active: Some(false),
            resources: Some(ResourceList { values: vec![] }),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = server
        .client
        .get_product(GetProductRequest { id: created.id })
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();

    assert_eq!(updated.sold, 4);
    assert!(!updated.is_active);
    assert!(updated.resources.is_empty());
    // untouched
    assert_eq!(updated.quantity, 10);
    assert_eq!(updated.add_price, 1000);
    assert_eq!(updated.metadata, br#"{"a":1}"#.to_vec());

    let status = server
        .client
        .update_product(UpdateProductRequest {
            id: created.id,
            sold: Some(11),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_delete_and_lookup_by_pop_id() {
    let mut server = start().await;

    let created = server
        .client
        .create_product(create_request(3, 10, ""))
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();
    let pop_id = server.repository.link_payment(created.id, 2).await.unwrap();

    let by_pop = server
        .client
        .get_product_by_pop_id(GetProductByPopIdRequest {
            product_on_payment_id: pop_id,
        })
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();
    assert_eq!(by_pop.id, created.id);

    server
        .client
        .delete_product(DeleteProductRequest { id: created.id })
        .await
        .unwrap();

    let status = server
        .client
        .delete_product(DeleteProductRequest { id: created.id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = server
        .client
        .get_product_by_pop_id(GetProductByPopIdRequest {
            product_on_payment_id: pop_id,
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}
