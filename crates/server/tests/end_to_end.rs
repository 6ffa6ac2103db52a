use std::net::SocketAddr;

use storefront_client::{
    BlockReason, ClientError, FormField, HttpStorefrontApi, LoadOutcome, OrderOutcome, StoreState,
    StorefrontApi,
};
use storefront_core::{Catalog, OrderRequest, OrderStatus, ProductId};
use storefront_server::{app, AppState};
use tokio::net::TcpListener;

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, app(AppState::default())).await.expect("serve storefront");
    });
    address
}

fn api_for(address: SocketAddr) -> HttpStorefrontApi {
    HttpStorefrontApi::new(format!("http://{address}/api"))
}

#[tokio::test]
async fn shopper_walkthrough_places_an_order() {
    let address = spawn_server().await;
    let api = api_for(address);
    let mut state = StoreState::default();

    assert_eq!(state.load_products(&api).await, LoadOutcome::Loaded(6));

    state.add_to_cart(ProductId(1)).expect("headphones listed");
    state.add_to_cart(ProductId(1)).expect("headphones listed");
    state.add_to_cart(ProductId(2)).expect("watch listed");
    assert_eq!(state.total_display(), "399.97");

    state.update_quantity(ProductId(1), 1);
    assert_eq!(state.total_display(), "299.98");

    state.set_form_field(FormField::FirstName, "Grace");
    state.set_form_field(FormField::LastName, "Hopper");
    state.set_form_field(FormField::Address, "1 Compiler Lane");

    match state.place_order(&api).await {
        OrderOutcome::Placed(confirmation) => {
            assert_eq!(confirmation.status, OrderStatus::Confirmed);
        }
        other => panic!("expected a placed order, got {other:?}"),
    }
    assert!(state.cart().is_empty());
    assert!(state.form().address.is_empty());
}

#[tokio::test]
async fn empty_cart_is_blocked_and_server_rejection_reaches_the_client_unchanged() {
    let address = spawn_server().await;
    let api = api_for(address);
    let mut state = StoreState::default();
    state.load_products(&api).await;
    state.set_form_field(FormField::FirstName, "Grace");
    state.set_form_field(FormField::LastName, "Hopper");
    state.set_form_field(FormField::Address, "1 Compiler Lane");

    let outcome = state.place_order(&api).await;

    assert_eq!(outcome, OrderOutcome::Blocked(BlockReason::EmptyCart));
    assert_eq!(state.form().last_name, "Hopper");
    assert!(!state.is_submitting());

    let empty = api
        .submit_order(&OrderRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            address: "1 Compiler Lane".to_string(),
            items: Vec::new(),
            total: "0.00".to_string(),
        })
        .await;
    assert!(matches!(
        empty,
        Err(ClientError::Rejected { status: 400, ref message })
            if message.as_deref() == Some("Order must contain at least one item")
    ));

    let direct = api
        .submit_order(&OrderRequest {
            first_name: "Grace".to_string(),
            last_name: String::new(),
            address: "1 Compiler Lane".to_string(),
            items: Vec::new(),
            total: "0.00".to_string(),
        })
        .await;

    match direct {
        Err(ClientError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Last name is required"));
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_reports_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let address = listener.local_addr().expect("local address");
    drop(listener);

    let api = api_for(address);
    let mut state = StoreState::default();
    assert_eq!(state.load_products(&api).await, LoadOutcome::Failed);

    state.add_product(&Catalog::reference().list()[0]);
    state.set_form_field(FormField::FirstName, "Grace");
    state.set_form_field(FormField::LastName, "Hopper");
    state.set_form_field(FormField::Address, "1 Compiler Lane");
    let outcome = state.place_order(&api).await;

    assert_eq!(
        outcome,
        OrderOutcome::Failed {
            message: "Network error. Please check if the server is running.".to_string(),
        }
    );
}
