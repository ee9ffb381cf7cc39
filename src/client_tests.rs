    use super::*;
    use std::cell::Cell;

    /// In-memory source that records how many times it was asked.
    struct StaticSource {
        response: Result<&'static str, u16>,
        calls: Cell<usize>,
    }

    impl StaticSource {
        fn body(body: &'static str) -> Self {
            Self {
                response: Ok(body),
                calls: Cell::new(0),
            }
        }

        fn status(status: u16) -> Self {
            Self {
                response: Err(status),
                calls: Cell::new(0),
            }
        }
    }

    impl FeedSource for StaticSource {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            match self.response {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(status) => Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                }),
            }
        }
    }

    #[test]
    fn test_client_feed_url_plain_username() {
        assert_eq!(
            feed_url(DEFAULT_BASE_URL, "alice"),
            "http://b.hatena.ne.jp/alice/favorite.rss"
        );
    }

    #[test]
    fn test_client_feed_url_escapes_username() {
        assert_eq!(
            feed_url(DEFAULT_BASE_URL, "a b/c?d"),
            "http://b.hatena.ne.jp/a+b%2Fc%3Fd/favorite.rss"
        );
    }

    #[test]
    fn test_client_feed_url_escapes_non_ascii() {
        assert_eq!(
            feed_url(DEFAULT_BASE_URL, "日"),
            "http://b.hatena.ne.jp/%E6%97%A5/favorite.rss"
        );
    }

    #[test]
    fn test_client_feed_url_ignores_trailing_slash() {
        assert_eq!(
            feed_url("http://localhost:8080/", "bob"),
            "http://localhost:8080/bob/favorite.rss"
        );
    }

    #[test]
    fn test_client_load_feed_success() {
        let source = StaticSource::body(
            "<rdf:RDF><item><title>Hello</title><hatena:bookmarkcount>3</hatena:bookmarkcount></item></rdf:RDF>",
        );
        let feed = load_feed(&source, "http://test/alice/favorite.rss").unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.bookmarks()[0].title, "Hello");
        assert_eq!(feed.bookmarks()[0].bookmark_count, 3);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_client_load_feed_fetch_failure_is_tagged() {
        let source = StaticSource::status(404);
        let result = load_feed(&source, "http://test/nobody/favorite.rss");
        match result {
            Err(FeedError::Fetch(FetchError::Status { status, url })) => {
                assert_eq!(status, 404);
                assert_eq!(url, "http://test/nobody/favorite.rss");
            }
            other => panic!("expected fetch failure, got {other:?}"),
        }
        assert_eq!(source.calls.get(), 1, "no retry after failure");
    }

    #[test]
    fn test_client_load_feed_decode_failure_is_tagged() {
        let source = StaticSource::body("<html><body>maintenance</html>");
        let result = load_feed(&source, "http://test/alice/favorite.rss");
        assert!(matches!(result, Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_client_load_feed_empty_feed() {
        let source = StaticSource::body("<rdf:RDF></rdf:RDF>");
        let feed = load_feed(&source, "http://test/alice/favorite.rss").unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn test_client_load_feed_through_trait_object() {
        let source: Box<dyn FeedSource> = Box::new(StaticSource::body("<r/>"));
        let feed = load_feed(source.as_ref(), "http://test/x/favorite.rss").unwrap();
        assert!(feed.is_empty());
    }

    /// Serves `response` verbatim to the first connection on a loopback
    /// port and returns the base URL.
    fn serve_once(response: String) -> (String, std::thread::JoinHandle<()>) {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            // Drain the request head before answering.
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        (base, handle)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/rss+xml\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn test_client_http_source_returns_body_on_success() {
        let body = "<rdf:RDF><item><title>Hello</title></item></rdf:RDF>";
        let (base, server) = serve_once(http_response("200 OK", body));
        let url = feed_url(&base, "alice");

        let source = HttpFeedSource::new().unwrap();
        let bytes = source.fetch(&url).unwrap();
        server.join().unwrap();

        assert_eq!(bytes, body.as_bytes());
        let feed = feed::decode(&bytes).unwrap();
        assert_eq!(feed.bookmarks()[0].title, "Hello");
    }

    #[test]
    fn test_client_http_source_non_success_status() {
        let (base, server) = serve_once(http_response("500 Internal Server Error", "oops"));
        let url = feed_url(&base, "alice");

        let result = HttpFeedSource::new().unwrap().fetch(&url);
        server.join().unwrap();

        match result {
            Err(FetchError::Status { status, url: failed }) => {
                assert_eq!(status, 500);
                assert_eq!(failed, url);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_client_http_source_connection_refused() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // Listener dropped above; nothing accepts on this port now.
        let url = feed_url(&format!("http://{addr}"), "alice");

        let result = HttpFeedSource::new().unwrap().fetch(&url);
        assert!(
            matches!(result, Err(FetchError::Transport { .. })),
            "{result:?}"
        );
    }

    #[test]
    fn test_client_load_feed_over_http_tags_status_as_fetch_failure() {
        let (base, server) = serve_once(http_response("404 Not Found", ""));
        let url = feed_url(&base, "nobody");

        let result = load_feed(&HttpFeedSource::new().unwrap(), &url);
        server.join().unwrap();

        assert!(matches!(
            result,
            Err(FeedError::Fetch(FetchError::Status { status: 404, .. }))
        ));
    }
