/// Snapshot construction and fan-out to connected clients.
pub mod broadcast;
/// OpenAPI documentation generation.
pub mod documentation;
/// Role-gated handlers for inbound quiz events.
pub mod quiz_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
