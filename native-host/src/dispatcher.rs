use std::io::{Read, Write};

use notes_engine::NoteWriter;
use tracing::{debug, info, warn};
use utils::native_messaging::{FramingError, Message, NativeMessenger};

use crate::messages::{Request, Response};

#[derive(Debug, Default)]
pub struct Dispatcher {
    writer: NoteWriter,
}

impl Dispatcher {
    pub fn new(writer: NoteWriter) -> Self {
        Self { writer }
    }

    pub fn handle(&self, message: &Message) -> Response {
        match Request::from_message(message) {
            Request::Save(request) => {
                debug!(
                    "Save request: vault={:?} title={:?} ({} bytes)",
                    request.vault_path,
                    request.page_title,
                    request.content.len()
                );
                match self.writer.save(&request) {
                    Ok(note) => Response::saved(note),
                    Err(e) => Response::failed(e),
                }
            }
            Request::Ping => Response::connected(),
            Request::Unknown(action) => {
                info!("Unknown action: {}", action);
                Response::unknown_action(&action)
            }
        }
    }

    /// Answers messages one at a time until the input stream closes.
    pub fn serve<R: Read, W: Write>(
        &self,
        messenger: &mut NativeMessenger<R, W>,
    ) -> Result<(), FramingError> {
        while let Some(message) = messenger.read_message()? {
            let response = self.handle(&message);
            match messenger.write_message(&response) {
                Err(FramingError::ResponseTooLarge(size)) => {
                    warn!("Dropping {} byte response, sending an error instead", size);
                    messenger.write_message(&Response::failed("Response too large"))?;
                }
                result => result?,
            }
        }
        info!("Input closed, shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn frame(value: Value) -> Vec<u8> {
        let body = serde_json::to_vec(&value).unwrap();
        let mut bytes = (body.len() as u32).to_le_bytes().to_vec();
        bytes.extend(body);
        bytes
    }

    fn responses(mut written: &[u8]) -> Vec<Value> {
        let mut out = Vec::new();
        while !written.is_empty() {
            let length =
                u32::from_le_bytes([written[0], written[1], written[2], written[3]]) as usize;
            out.push(serde_json::from_slice(&written[4..4 + length]).unwrap());
            written = &written[4 + length..];
        }
        out
    }

    fn run(requests: &[Value]) -> Vec<Value> {
        let input: Vec<u8> = requests.iter().cloned().flat_map(frame).collect();
        let mut messenger = NativeMessenger::new(Cursor::new(input), Vec::new());
        Dispatcher::default().serve(&mut messenger).unwrap();
        let (_, written) = messenger.into_inner();
        responses(&written)
    }

    #[test]
    fn test_ping() {
        assert_eq!(
            run(&[json!({ "action": "ping" })]),
            vec![json!({ "success": true, "status": "connected" })]
        );
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            run(&[json!({ "action": "delete" }), json!({ "vaultPath": "/tmp" })]),
            vec![
                json!({ "success": false, "error": "Unknown action: delete" }),
                json!({ "success": false, "error": "Unknown action: None" }),
            ]
        );
    }

    #[test]
    fn test_save_then_ping() {
        let dir = tempdir().unwrap();
        let vault = dir.path().to_string_lossy().into_owned();

        let replies = run(&[
            json!({
                "action": "save",
                "vaultPath": vault,
                "content": "# Hello World\nbody",
                "pageTitle": "My Chat",
            }),
            json!({ "action": "ping" }),
        ]);

        let expected_path = dir.path().join("My Chat").join("Hello World.md");
        assert_eq!(
            replies[0],
            json!({
                "success": true,
                "filepath": expected_path.to_string_lossy(),
                "filename": "Hello World.md",
                "folder": "My Chat",
            })
        );
        assert_eq!(replies[1], json!({ "success": true, "status": "connected" }));
        assert_eq!(fs::read_to_string(expected_path).unwrap(), "# Hello World\nbody");
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let dir = tempdir().unwrap();
        let vault = dir.path().to_string_lossy().into_owned();
        let missing = dir.path().join("missing").to_string_lossy().into_owned();

        let replies = run(&[
            json!({ "action": "save", "vaultPath": "", "content": "text" }),
            json!({ "action": "save", "vaultPath": missing, "content": "text" }),
            json!({ "action": "save", "vaultPath": vault, "content": "   " }),
            json!({ "action": "ping" }),
        ]);

        assert_eq!(replies.len(), 4);
        assert_eq!(replies[0], json!({ "success": false, "error": "Vault path not configured" }));
        assert_eq!(
            replies[1],
            json!({ "success": false, "error": format!("Vault path does not exist: {}", missing) })
        );
        assert_eq!(replies[2], json!({ "success": false, "error": "Note content is empty" }));
        assert_eq!(replies[3]["success"], true);
    }

    #[test]
    fn test_duplicate_saves_get_distinct_files() {
        let dir = tempdir().unwrap();
        let save = json!({
            "action": "save",
            "vaultPath": dir.path().to_string_lossy(),
            "content": "Same first line\nmore",
        });

        let replies = run(&[save.clone(), save]);

        assert_eq!(replies[0]["filename"], "Same first line.md");
        let second = replies[1]["filename"].as_str().unwrap();
        assert!(second.starts_with("Same first line_"), "{second}");
        assert!(second.ends_with(".md"));
        assert_eq!(replies[0]["folder"], "Untitled Conversation");
    }

    #[test]
    fn test_oversized_response_keeps_serving() {
        let replies = run(&[
            json!({ "action": "x".repeat(1_100_000) }),
            json!({ "action": "ping" }),
        ]);

        assert_eq!(
            replies,
            vec![
                json!({ "success": false, "error": "Response too large" }),
                json!({ "success": true, "status": "connected" }),
            ]
        );
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn test_malformed_frame_is_fatal() {
        let mut input = frame(json!({ "action": "ping" }));
        input.extend_from_slice(&[3, 0, 0, 0, b'{', b'x']);
        let mut messenger = NativeMessenger::new(Cursor::new(input), Vec::new());

        assert!(Dispatcher::default().serve(&mut messenger).is_err());
        // the first, well-formed message was still answered
        let (_, written) = messenger.into_inner();
        assert_eq!(responses(&written), vec![json!({ "success": true, "status": "connected" })]);
    }
}
