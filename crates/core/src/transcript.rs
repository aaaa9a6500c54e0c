//! Conversational transcript: an append-only list of turns patched in place
//! by id.

use crate::error::{Error, Result};
use crate::types::{Role, SiteResult, Turn, TurnId, TurnStatus};
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with a settled assistant greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append(Role::Assistant, greeting);
        transcript
    }

    /// Append a settled turn and return a copy of it
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Turn {
        self.push(role, content.into(), TurnStatus::Settled)
    }

    /// Append a pending assistant turn, to be resolved or failed later by id
    pub fn append_placeholder(&mut self, content: impl Into<String>) -> Turn {
        self.push(Role::Assistant, content.into(), TurnStatus::Pending)
    }

    fn push(&mut self, role: Role, content: String, status: TurnStatus) -> Turn {
        self.next_id += 1;
        let turn = Turn {
            id: TurnId(self.next_id),
            role,
            content,
            status,
            site_ref: None,
            created_at: Utc::now(),
        };
        self.turns.push(turn.clone());
        turn
    }

    /// Apply `updater` to the turn with `id`. Other turns are untouched.
    pub fn patch<F>(&mut self, id: TurnId, updater: F) -> Result<()>
    where
        F: FnOnce(&mut Turn),
    {
        let turn = self
            .turns
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::UnknownTurn(id))?;
        updater(turn);
        Ok(())
    }

    /// Terminal success patch for a pending placeholder
    pub fn resolve(&mut self, id: TurnId, content: String, site: SiteResult) -> Result<()> {
        self.settle(id, TurnStatus::Resolved, content, Some(site))
    }

    /// Terminal failure patch for a pending placeholder. The turn stays in
    /// the transcript as a permanent record.
    pub fn fail(&mut self, id: TurnId, content: String) -> Result<()> {
        self.settle(id, TurnStatus::Failed, content, None)
    }

    fn settle(
        &mut self,
        id: TurnId,
        status: TurnStatus,
        content: String,
        site: Option<SiteResult>,
    ) -> Result<()> {
        match self.get(id) {
            None => return Err(Error::UnknownTurn(id)),
            Some(turn) if !turn.is_pending() => return Err(Error::TurnNotPending(id)),
            Some(_) => {}
        }
        self.patch(id, |turn| {
            turn.status = status;
            turn.content = content;
            turn.site_ref = site;
        })
    }

    pub fn get(&self, id: TurnId) -> Option<&Turn> {
        self.turns.iter().find(|t| t.id == id)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_pending()).count()
    }

    /// Most recent turn carrying a site reference
    pub fn latest_site(&self) -> Option<&SiteResult> {
        self.turns.iter().rev().find_map(|t| t.site_ref.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SiteId;

    fn site(id: &str, name: &str) -> SiteResult {
        SiteResult {
            site_id: SiteId::new(id),
            site_name: name.to_string(),
        }
    }

    #[test]
    fn test_append_issues_increasing_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.append(Role::User, "one");
        let b = transcript.append(Role::Assistant, "two");
        assert!(b.id > a.id);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].content, "one");
    }

    #[test]
    fn test_greeting_is_settled() {
        let transcript = Transcript::with_greeting("Hi!");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role, Role::Assistant);
        assert_eq!(transcript.pending_count(), 0);
    }

    #[test]
    fn test_patch_only_touches_target() {
        let mut transcript = Transcript::new();
        let first = transcript.append(Role::Assistant, "first");
        let second = transcript.append(Role::Assistant, "second");

        transcript
            .patch(first.id, |t| t.content = "patched".to_string())
            .unwrap();

        assert_eq!(transcript.get(first.id).unwrap().content, "patched");
        assert_eq!(transcript.get(second.id).unwrap().content, "second");
    }

    #[test]
    fn test_patch_unknown_id_is_an_error() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "hello");
        let result = transcript.patch(TurnId(99), |t| t.content.clear());
        assert!(matches!(result, Err(Error::UnknownTurn(TurnId(99)))));
        assert_eq!(transcript.turns()[0].content, "hello");
    }

    #[test]
    fn test_resolve_patches_placeholder_not_last_turn() {
        let mut transcript = Transcript::new();
        let placeholder = transcript.append_placeholder("working");
        transcript.append(Role::User, "later turn");

        transcript
            .resolve(placeholder.id, "done".to_string(), site("abc123", "AI Tech Blog"))
            .unwrap();

        let turn = transcript.get(placeholder.id).unwrap();
        assert_eq!(turn.status, TurnStatus::Resolved);
        assert_eq!(turn.site_ref.as_ref().unwrap().site_id.as_str(), "abc123");
        assert_eq!(transcript.turns()[1].content, "later turn");
        assert!(transcript.turns()[1].site_ref.is_none());
    }

    #[test]
    fn test_terminal_patch_happens_once() {
        let mut transcript = Transcript::new();
        let placeholder = transcript.append_placeholder("working");

        transcript.fail(placeholder.id, "boom".to_string()).unwrap();
        let again = transcript.resolve(placeholder.id, "late".to_string(), site("x", "X"));

        assert!(matches!(again, Err(Error::TurnNotPending(_))));
        let turn = transcript.get(placeholder.id).unwrap();
        assert_eq!(turn.status, TurnStatus::Failed);
        assert_eq!(turn.content, "boom");
    }

    #[test]
    fn test_settled_turns_cannot_be_resolved() {
        let mut transcript = Transcript::new();
        let user = transcript.append(Role::User, "hi");
        assert!(transcript.fail(user.id, "nope".to_string()).is_err());
        assert_eq!(transcript.get(user.id).unwrap().status, TurnStatus::Settled);
    }

    #[test]
    fn test_latest_site() {
        let mut transcript = Transcript::with_greeting("hello");
        assert!(transcript.latest_site().is_none());
        let first = transcript.append_placeholder("a");
        transcript
            .resolve(first.id, "a".to_string(), site("one", "One"))
            .unwrap();
        let second = transcript.append_placeholder("b");
        transcript
            .resolve(second.id, "b".to_string(), site("two", "Two"))
            .unwrap();

        assert_eq!(transcript.latest_site().unwrap().site_name, "Two");
    }
}
