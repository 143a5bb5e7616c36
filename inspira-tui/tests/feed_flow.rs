//! End-to-end exercises of the feed lifecycle against an in-memory server:
//! pagination order, single-flight loading, local prepends and the
//! optimistic like toggle.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use inspira::api::{ApiError, ApiResult};
use inspira::feed::{CommentThread, FeedApi, FeedSync, LoadOutcome};
use inspira_types::{Artwork, Comment, CreateCommentRequest, LikeResponse, Page};

fn artwork(id: &str, author: &str, likes: i64) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: format!("Obra {id}"),
        description: "Acrílico sobre tela".to_string(),
        published_at: "2026-02-10T18:00:00Z".to_string(),
        author_username: author.to_string(),
        category_name: "Pintura".to_string(),
        url: Some(format!("https://cdn.inspira.example/{id}.png")),
        media_content_type: Some("image/png".to_string()),
        total_likes: likes,
        liked_by_user: false,
    }
}

fn comment(id: &str, author: &str) -> Comment {
    Comment {
        id: id.to_string(),
        content: format!("Comentário {id}"),
        commented_at: "2026-02-10T18:05:00Z".to_string(),
        author_username: author.to_string(),
        artwork_id: "a".to_string(),
        author_photo_url: None,
    }
}

#[derive(Default)]
struct ScriptedServer {
    pages: Mutex<VecDeque<ApiResult<Page<Artwork>>>>,
    likes: Mutex<VecDeque<ApiResult<LikeResponse>>>,
    comments: Mutex<VecDeque<ApiResult<Vec<Comment>>>>,
    fetches: Mutex<Vec<Option<String>>>,
    deleted_comments: Mutex<Vec<String>>,
}

impl ScriptedServer {
    fn push_page(&self, items: Vec<Artwork>, cursor: Option<&str>, has_more: bool) {
        self.pages.lock().unwrap().push_back(Ok(Page {
            items,
            next_cursor: cursor.map(str::to_string),
            has_more_items: has_more,
        }));
    }
}

#[async_trait]
impl FeedApi for ScriptedServer {
    async fn fetch_page(
        &self,
        _category_id: Option<&str>,
        _author_username: Option<&str>,
        cursor: Option<&str>,
        _page_size: u32,
    ) -> ApiResult<Page<Artwork>> {
        self.fetches
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::empty()))
    }

    async fn like(&self, _artwork_id: &str) -> ApiResult<LikeResponse> {
        self.likes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected like call")
    }

    async fn unlike(&self, artwork_id: &str) -> ApiResult<LikeResponse> {
        self.like(artwork_id).await
    }

    async fn delete_artwork(&self, _artwork_id: &str) -> ApiResult<()> {
        Ok(())
    }

    async fn fetch_comments(&self, _artwork_id: &str) -> ApiResult<Vec<Comment>> {
        self.comments
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        Ok(Comment {
            id: "c-1".to_string(),
            content: request.content.clone(),
            commented_at: "2026-02-10T18:05:00Z".to_string(),
            author_username: "lia".to_string(),
            artwork_id: request.artwork_id.clone(),
            author_photo_url: None,
        })
    }

    async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        self.deleted_comments
            .lock()
            .unwrap()
            .push(comment_id.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn two_pages_then_exhaustion() {
    let server = ScriptedServer::default();
    server.push_page(
        vec![artwork("a", "lia", 1), artwork("b", "rui", 2)],
        Some("cursor-1"),
        true,
    );
    server.push_page(vec![artwork("c", "ana", 3)], None, false);

    let mut feed = FeedSync::new(10);

    feed.load(&server, true, None).await.unwrap();
    feed.load(&server, false, None).await.unwrap();

    let ids: Vec<&str> = feed.items().iter().map(|v| v.artwork.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    // The cursor from the first answer travels with the second request.
    let fetches = server.fetches.lock().unwrap().clone();
    assert_eq!(fetches, vec![None, Some("cursor-1".to_string())]);

    // No more items: further loads never reach the server.
    assert_eq!(
        feed.load(&server, false, None).await.unwrap(),
        LoadOutcome::Skipped
    );
    assert_eq!(server.fetches.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn local_post_lands_at_the_head() {
    let server = ScriptedServer::default();
    server.push_page(
        vec![artwork("a", "lia", 0), artwork("b", "rui", 0)],
        None,
        false,
    );

    let mut feed = FeedSync::new(10);
    feed.load(&server, true, None).await.unwrap();

    feed.prepend(artwork("fresh", "lia", 0), None);

    let ids: Vec<&str> = feed.items().iter().map(|v| v.artwork.id.as_str()).collect();
    assert_eq!(ids, vec!["fresh", "a", "b"]);
}

#[tokio::test]
async fn like_toggle_round_trip_with_failure_revert() {
    let server = ScriptedServer::default();
    server.push_page(vec![artwork("a", "rui", 5)], None, false);

    let mut feed = FeedSync::new(10);
    feed.load(&server, true, None).await.unwrap();

    // First toggle succeeds and reconciles with the server counter.
    server
        .likes
        .lock()
        .unwrap()
        .push_back(Ok(LikeResponse {
            total_likes: 6,
            liked: true,
        }));
    feed.toggle_like(&server, "a").await.unwrap();
    let art = &feed.find("a").unwrap().artwork;
    assert!(art.liked_by_user);
    assert_eq!(art.total_likes, 6);

    // Second toggle is rejected: the pre-toggle state comes back exactly.
    server
        .likes
        .lock()
        .unwrap()
        .push_back(Err(ApiError::Api("indisponível".to_string())));
    assert!(feed.toggle_like(&server, "a").await.is_err());
    let art = &feed.find("a").unwrap().artwork;
    assert!(art.liked_by_user);
    assert_eq!(art.total_likes, 6);
}

#[tokio::test]
async fn category_switch_restarts_from_a_clean_list() {
    let server = ScriptedServer::default();
    server.push_page(vec![artwork("a", "lia", 0)], Some("cursor-1"), true);
    server.push_page(vec![artwork("z", "zoe", 0)], None, false);

    let mut feed = FeedSync::new(10);
    feed.load(&server, true, None).await.unwrap();
    assert_eq!(feed.len(), 1);

    feed.set_category(Some("cat-7".to_string()));
    feed.load(&server, true, None).await.unwrap();

    let ids: Vec<&str> = feed.items().iter().map(|v| v.artwork.id.as_str()).collect();
    assert_eq!(ids, vec!["z"]);
    // The reset dropped the old cursor before fetching.
    let fetches = server.fetches.lock().unwrap().clone();
    assert_eq!(fetches[1], None);
}

#[tokio::test]
async fn comment_thread_lists_and_deletes_against_the_server() {
    let server = ScriptedServer::default();
    server
        .comments
        .lock()
        .unwrap()
        .push_back(Ok(vec![comment("c1", "rui"), comment("c2", "ana")]));

    let mut thread = CommentThread::new("a");
    assert_eq!(thread.load(&server).await.unwrap(), 2);
    assert_eq!(thread.get(0).unwrap().id, "c1");

    thread.delete(&server, "c1").await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread.get(0).unwrap().id, "c2");
    assert_eq!(
        server.deleted_comments.lock().unwrap().as_slice(),
        &["c1".to_string()]
    );
}

#[tokio::test]
async fn failed_page_is_retried_with_the_same_cursor() {
    let server = ScriptedServer::default();
    server.push_page(vec![artwork("a", "lia", 0)], Some("cursor-1"), true);
    server
        .pages
        .lock()
        .unwrap()
        .push_back(Err(ApiError::Api("timeout".to_string())));
    server.push_page(vec![artwork("b", "rui", 0)], None, false);

    let mut feed = FeedSync::new(10);
    feed.load(&server, true, None).await.unwrap();
    assert!(feed.load(&server, false, None).await.is_err());

    // State untouched by the failure, so the retry resumes where it was.
    assert_eq!(feed.next_cursor(), Some("cursor-1"));
    assert!(feed.has_more());

    feed.load(&server, false, None).await.unwrap();
    assert_eq!(feed.len(), 2);
    let fetches = server.fetches.lock().unwrap().clone();
    assert_eq!(fetches[2], Some("cursor-1".to_string()));
}
