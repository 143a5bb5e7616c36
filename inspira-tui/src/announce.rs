use tokio::sync::broadcast;

use inspira_types::Artwork;

/// Announcement channel for locally created posts.
///
/// The composer publishes the artwork returned by the create call; the feed
/// subscribes and prepends it, so a just-published post appears immediately
/// without a full reload.
#[derive(Clone)]
pub struct NewPostChannel {
    tx: broadcast::Sender<Artwork>,
}

impl NewPostChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn announce(&self, artwork: Artwork) {
        // No subscribers is fine; the event is simply dropped.
        let _ = self.tx.send(artwork);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Artwork> {
        self.tx.subscribe()
    }
}

impl Default for NewPostChannel {
    fn default() -> Self {
        Self::new()
    }
}
