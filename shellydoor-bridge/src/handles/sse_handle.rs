use axum::extract::State;
use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::handles::DoorHandleState;

/// Streams the characteristic values, starting with the current ones.
pub async fn sse_handler(
    State(state): State<DoorHandleState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.host.subscribe()).map(|characteristics| {
        Event::default()
            .event("characteristics")
            .json_data(&characteristics)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
