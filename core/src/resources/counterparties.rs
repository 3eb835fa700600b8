//! Transfer counterparties.

use serde_json::{json, Value};

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy)]
pub struct Counterparties<'a> {
    transport: &'a Transport,
}

impl<'a> Counterparties<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn set_blacklist(
        &self,
        counterparty_id: &str,
        blacklist: bool,
    ) -> Result<Value, MapleradError> {
        let id = segment("counterparty id", counterparty_id)?;
        dispatch(
            self.transport,
            HttpMethod::Post,
            &format!("/counterparties/blacklist/{id}"),
            RequestOptions::new().json(&json!({ "blacklist": blacklist }))?,
        )
    }

    pub fn get(&self, counterparty_id: &str) -> Result<Value, MapleradError> {
        let id = segment("counterparty id", counterparty_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/counterparties/{id}"),
            RequestOptions::new(),
        )
    }

    pub fn list(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/counterparties", RequestOptions::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body_of, path_of, scripted_client, ScriptedExecutor};

    #[test]
    fn blacklist_posts_flag_to_blacklist_path() {
        let (client, executor) = scripted_client(ScriptedExecutor::new());
        client.counterparties().set_blacklist("cp_1", false).unwrap();
        let req = executor.last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(path_of(&req), "/counterparties/blacklist/cp_1");
        assert_eq!(body_of(&req), json!({"blacklist": false}));
    }

    #[test]
    fn get_and_list() {
        let (client, executor) = scripted_client(ScriptedExecutor::new());
        client.counterparties().get("cp_1").unwrap();
        client.counterparties().list().unwrap();
        let requests = executor.requests();
        assert_eq!(path_of(&requests[0]), "/counterparties/cp_1");
        assert_eq!(path_of(&requests[1]), "/counterparties");
    }
}
