use std::collections::HashMap;

use async_trait::async_trait;

use crate::api::{ApiClient, ApiResult};
use crate::media::{MediaKind, PlayerSource};
use inspira_types::{Artwork, Claims, Comment, CreateCommentRequest, LikeResponse, Page};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Server operations the feed needs. `ApiClient` is the real implementation;
/// tests drive the feed with an in-memory fake.
#[async_trait]
pub trait FeedApi {
    async fn fetch_page(
        &self,
        category_id: Option<&str>,
        author_username: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> ApiResult<Page<Artwork>>;

    async fn like(&self, artwork_id: &str) -> ApiResult<LikeResponse>;
    async fn unlike(&self, artwork_id: &str) -> ApiResult<LikeResponse>;
    async fn delete_artwork(&self, artwork_id: &str) -> ApiResult<()>;
    async fn fetch_comments(&self, artwork_id: &str) -> ApiResult<Vec<Comment>>;
    async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment>;
    async fn delete_comment(&self, comment_id: &str) -> ApiResult<()>;
}

#[async_trait]
impl FeedApi for ApiClient {
    async fn fetch_page(
        &self,
        category_id: Option<&str>,
        author_username: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> ApiResult<Page<Artwork>> {
        self.get_artworks(category_id, author_username, cursor, page_size)
            .await
    }

    async fn like(&self, artwork_id: &str) -> ApiResult<LikeResponse> {
        self.like_artwork(artwork_id).await
    }

    async fn unlike(&self, artwork_id: &str) -> ApiResult<LikeResponse> {
        self.unlike_artwork(artwork_id).await
    }

    async fn delete_artwork(&self, artwork_id: &str) -> ApiResult<()> {
        ApiClient::delete_artwork(self, artwork_id).await
    }

    async fn fetch_comments(&self, artwork_id: &str) -> ApiResult<Vec<Comment>> {
        self.get_comments(artwork_id).await
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        ApiClient::create_comment(self, request).await
    }

    async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        ApiClient::delete_comment(self, comment_id).await
    }
}

/// An artwork plus the client-only fields derived when it entered the list.
///
/// The derived fields are computed once, at insertion, and never again: a role
/// change mid-session does not retroactively update the permission flags of
/// items already loaded.
#[derive(Debug, Clone)]
pub struct ArtworkView {
    pub artwork: Artwork,
    pub media_kind: MediaKind,
    pub player_source: Option<PlayerSource>,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl ArtworkView {
    pub fn enrich(artwork: Artwork, claims: Option<&Claims>) -> Self {
        let is_admin = claims.map(|c| c.role.is_admin()).unwrap_or(false);
        let is_owner = claims
            .map(|c| c.name == artwork.author_username)
            .unwrap_or(false);
        let media_kind = MediaKind::from_mime(artwork.media_content_type.as_deref());
        let player_source = PlayerSource::for_media(
            artwork.url.as_deref(),
            media_kind,
            artwork.media_content_type.as_deref(),
        );

        Self {
            media_kind,
            player_source,
            can_edit: is_owner,
            can_delete: is_owner || is_admin,
            artwork,
        }
    }
}

/// Comment input state kept per listed artwork.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub text: String,
    pub open: bool,
}

/// Loaded comment list of one artwork, shown in the comments view.
pub struct CommentThread {
    artwork_id: String,
    comments: Vec<Comment>,
    loading: bool,
}

impl CommentThread {
    pub fn new(artwork_id: impl Into<String>) -> Self {
        Self {
            artwork_id: artwork_id.into(),
            comments: Vec::new(),
            loading: false,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    /// A comment may be deleted by its author or by an administrator.
    pub fn can_delete(comment: &Comment, claims: Option<&Claims>) -> bool {
        claims
            .map(|c| c.role.is_admin() || c.name == comment.author_username)
            .unwrap_or(false)
    }

    /// Replaces the list with a fetched one, in server order.
    pub fn apply(&mut self, comments: Vec<Comment>) -> usize {
        self.loading = false;
        self.comments = comments;
        self.comments.len()
    }

    /// Fetches the artwork's full comment list. A failed fetch keeps whatever
    /// was already loaded.
    pub async fn load(&mut self, api: &impl FeedApi) -> ApiResult<usize> {
        self.loading = true;
        match api.fetch_comments(&self.artwork_id).await {
            Ok(comments) => Ok(self.apply(comments)),
            Err(e) => {
                log::warn!("Comment fetch failed for {}: {e}", self.artwork_id);
                self.loading = false;
                Err(e)
            }
        }
    }

    /// Deletes a comment server-side, then removes it locally. A failed
    /// deletion leaves the list untouched.
    pub async fn delete(&mut self, api: &impl FeedApi, comment_id: &str) -> ApiResult<()> {
        api.delete_comment(comment_id).await?;
        self.comments.retain(|c| c.id != comment_id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and its items appended.
    Loaded(usize),
    /// The call was suppressed: a fetch was already in flight, or the feed
    /// had reported no further items and this was not a reset.
    Skipped,
}

/// Append-only, reverse-chronological artwork list backed by cursor-paginated
/// fetches, plus locally originated prepends and optimistic like toggles.
///
/// One instance owns the list; every mutation goes through a named entry
/// point (append via [`load`], [`prepend`], patch-by-id, remove-by-id), so
/// the ordering and single-flight invariants stay testable.
///
/// [`load`]: FeedSync::load
pub struct FeedSync {
    items: Vec<ArtworkView>,
    comment_drafts: HashMap<String, CommentDraft>,
    next_cursor: Option<String>,
    has_more: bool,
    loading: bool,
    category_id: Option<String>,
    author_username: Option<String>,
    page_size: u32,
}

impl FeedSync {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            comment_drafts: HashMap::new(),
            next_cursor: None,
            has_more: true,
            loading: false,
            category_id: None,
            author_username: None,
            page_size,
        }
    }

    /// Feed restricted to a single author (profile page variant).
    pub fn for_author(author_username: impl Into<String>, page_size: u32) -> Self {
        let mut feed = Self::new(page_size);
        feed.author_username = Some(author_username.into());
        feed
    }

    /// Switches the category filter. The caller is expected to follow up with
    /// `load(reset = true)`.
    pub fn set_category(&mut self, category_id: Option<String>) {
        self.category_id = category_id;
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn items(&self) -> &[ArtworkView] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn get(&self, index: usize) -> Option<&ArtworkView> {
        self.items.get(index)
    }

    pub fn find(&self, artwork_id: &str) -> Option<&ArtworkView> {
        self.items.iter().find(|v| v.artwork.id == artwork_id)
    }

    pub fn comment_draft(&self, artwork_id: &str) -> Option<&CommentDraft> {
        self.comment_drafts.get(artwork_id)
    }

    pub fn comment_draft_mut(&mut self, artwork_id: &str) -> Option<&mut CommentDraft> {
        self.comment_drafts.get_mut(artwork_id)
    }

    /// Guard half of [`FeedSync::load`]: decides whether a fetch may start and
    /// performs the reset bookkeeping. Returns false when the call must be
    /// suppressed (fetch in flight, or no more items and not a reset).
    pub fn begin_load(&mut self, reset: bool) -> bool {
        if self.loading || (!self.has_more && !reset) {
            return false;
        }

        if reset {
            self.next_cursor = None;
            self.has_more = true;
            self.items.clear();
            self.comment_drafts.clear();
        }

        self.loading = true;
        true
    }

    /// Applies a fetched page: stores the cursor pair and appends the
    /// enriched items after everything already listed.
    pub fn apply_page(&mut self, page: Page<Artwork>, claims: Option<&Claims>) -> usize {
        self.loading = false;
        self.next_cursor = page.next_cursor;
        self.has_more = page.has_more_items;

        let count = page.items.len();
        for artwork in page.items {
            let view = ArtworkView::enrich(artwork, claims);
            self.comment_drafts
                .insert(view.artwork.id.clone(), CommentDraft::default());
            self.items.push(view);
        }
        count
    }

    /// Ends the loading state after a failed fetch. Cursor and has-more are
    /// left untouched so the next trigger simply retries.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    /// Fetches the first page (`reset`) or the next one, single-flight.
    pub async fn load(
        &mut self,
        api: &impl FeedApi,
        reset: bool,
        claims: Option<&Claims>,
    ) -> ApiResult<LoadOutcome> {
        if !self.begin_load(reset) {
            return Ok(LoadOutcome::Skipped);
        }

        let result = api
            .fetch_page(
                self.category_id.as_deref(),
                self.author_username.as_deref(),
                self.next_cursor.as_deref(),
                self.page_size,
            )
            .await;

        match result {
            Ok(page) => Ok(LoadOutcome::Loaded(self.apply_page(page, claims))),
            Err(e) => {
                log::warn!("Feed page fetch failed: {e}");
                self.fail_load();
                Err(e)
            }
        }
    }

    /// Inserts a locally announced new post at the head of the list, with the
    /// same enrichment a fetched item gets. Nothing else moves.
    pub fn prepend(&mut self, artwork: Artwork, claims: Option<&Claims>) {
        let view = ArtworkView::enrich(artwork, claims);
        self.comment_drafts
            .insert(view.artwork.id.clone(), CommentDraft::default());
        self.items.insert(0, view);
    }

    /// Optimistic like toggle: flips the flag and adjusts the counter first,
    /// then reconciles with the authoritative server counts on success. On
    /// failure the exact pre-toggle values are restored.
    pub async fn toggle_like(&mut self, api: &impl FeedApi, artwork_id: &str) -> ApiResult<()> {
        let Some(index) = self.items.iter().position(|v| v.artwork.id == artwork_id) else {
            return Ok(());
        };

        let was_liked = self.items[index].artwork.liked_by_user;
        let previous_total = self.items[index].artwork.total_likes;

        {
            let art = &mut self.items[index].artwork;
            art.liked_by_user = !was_liked;
            art.total_likes += if was_liked { -1 } else { 1 };
        }

        let result = if was_liked {
            api.unlike(artwork_id).await
        } else {
            api.like(artwork_id).await
        };

        match result {
            Ok(response) => {
                // The item may have been removed while the request was in
                // flight; a stale response is silently dropped.
                if let Some(view) = self.items.iter_mut().find(|v| v.artwork.id == artwork_id) {
                    view.artwork.liked_by_user = response.liked;
                    view.artwork.total_likes = response.total_likes;
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("Like toggle failed for {artwork_id}, reverting: {e}");
                if let Some(view) = self.items.iter_mut().find(|v| v.artwork.id == artwork_id) {
                    view.artwork.liked_by_user = was_liked;
                    view.artwork.total_likes = previous_total;
                }
                Err(e)
            }
        }
    }

    /// Deletes an artwork server-side, then removes it locally. A failed
    /// deletion leaves the list untouched.
    pub async fn remove(&mut self, api: &impl FeedApi, artwork_id: &str) -> ApiResult<()> {
        api.delete_artwork(artwork_id).await?;
        self.items.retain(|v| v.artwork.id != artwork_id);
        self.comment_drafts.remove(artwork_id);
        Ok(())
    }

    /// Patches title and description of a listed artwork after an edit.
    pub fn apply_update(&mut self, updated: &Artwork) {
        if let Some(view) = self.items.iter_mut().find(|v| v.artwork.id == updated.id) {
            view.artwork.title = updated.title.clone();
            view.artwork.description = updated.description.clone();
        }
    }

    pub fn toggle_comment_box(&mut self, artwork_id: &str) {
        if let Some(draft) = self.comment_drafts.get_mut(artwork_id) {
            draft.open = !draft.open;
        }
    }

    /// Submits the comment draft of an artwork. An empty draft is rejected
    /// before any network call. On success the draft is cleared and closed.
    pub async fn submit_comment(
        &mut self,
        api: &impl FeedApi,
        artwork_id: &str,
    ) -> ApiResult<Option<Comment>> {
        let text = match self.comment_drafts.get(artwork_id) {
            Some(draft) if !draft.text.trim().is_empty() => draft.text.trim().to_string(),
            _ => return Ok(None),
        };

        let request = CreateCommentRequest {
            artwork_id: artwork_id.to_string(),
            content: text,
        };
        let comment = api.create_comment(&request).await?;

        if let Some(draft) = self.comment_drafts.get_mut(artwork_id) {
            draft.text.clear();
            draft.open = false;
        }

        Ok(Some(comment))
    }
}
