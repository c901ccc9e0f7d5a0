//! Scenario tests for the arena.
//!
//! Clients are backed by in-memory outboxes and the dice are scripted, so
//! every match plays out the same way each run. `pump` plays the role of
//! the server loop: it dispatches ready clients in id order until nobody
//! is ready, disconnecting any that report closure.

use std::collections::{BTreeMap, VecDeque};
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use skirmish_arena::{Arena, ArenaConfig, CheatHook, Dice, Dispatch};
use skirmish_session::{Client, ClientState, Purpose, Resume};
use skirmish_transport::{ConnectionId, Inbound, InboundEvent, Outbox};
use tokio::sync::mpsc::UnboundedReceiver;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Dice that replay queued values. An empty queue rolls the bottom of the
/// range and flips `true`.
#[derive(Clone, Default)]
struct ScriptedDice {
    script: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    rolls: VecDeque<u32>,
    flips: VecDeque<bool>,
}

impl ScriptedDice {
    fn rolls(&self, values: &[u32]) {
        self.script.lock().unwrap().rolls.extend(values);
    }

    fn flips(&self, values: &[bool]) {
        self.script.lock().unwrap().flips.extend(values);
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        let next = self.script.lock().unwrap().rolls.pop_front();
        next.unwrap_or(*range.start())
            .clamp(*range.start(), *range.end())
    }

    fn flip(&mut self) -> bool {
        self.script.lock().unwrap().flips.pop_front().unwrap_or(true)
    }
}

struct Harness {
    arena: Arena<ScriptedDice>,
    dice: ScriptedDice,
    outputs: BTreeMap<u64, UnboundedReceiver<Vec<u8>>>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    fn with_config(config: ArenaConfig) -> Self {
        let dice = ScriptedDice::default();
        Self {
            arena: Arena::new(config, dice.clone()),
            dice,
            outputs: BTreeMap::new(),
        }
    }

    fn connect(&mut self, id: u64) {
        let (outbox, rx) = Outbox::channel();
        let peer: SocketAddr = format!("10.0.0.{id}:40000").parse().unwrap();
        self.arena
            .admit(ConnectionId::new(id), peer, outbox)
            .expect("fresh id");
        self.outputs.insert(id, rx);
    }

    fn send(&mut self, id: u64, text: &str) {
        self.arena.feed(Inbound {
            id: ConnectionId::new(id),
            event: InboundEvent::Data(text.as_bytes().to_vec()),
        });
        self.pump();
    }

    fn close(&mut self, id: u64) {
        self.arena.feed(Inbound {
            id: ConnectionId::new(id),
            event: InboundEvent::Closed,
        });
        self.pump();
    }

    /// Connects a client and registers `name`, discarding its output.
    fn join(&mut self, id: u64, name: &str) {
        self.connect(id);
        self.send(id, &format!("{name}\n"));
    }

    fn pump(&mut self) {
        for _ in 0..10_000 {
            let ready = self.arena.ready();
            if ready.is_empty() {
                return;
            }
            for id in ready {
                match self.arena.dispatch(id).expect("dispatch") {
                    Dispatch::Continue => {}
                    Dispatch::Closed => {
                        self.arena.disconnect(id).expect("disconnect")
                    }
                }
            }
        }
        panic!("arena never settled");
    }

    /// Everything sent to `id` since the last call.
    fn output(&mut self, id: u64) -> String {
        let rx = self.outputs.get_mut(&id).expect("known client");
        let mut text = String::new();
        while let Ok(chunk) = rx.try_recv() {
            text.push_str(&String::from_utf8_lossy(&chunk));
        }
        text
    }

    fn drain_all(&mut self) {
        let ids: Vec<u64> = self.outputs.keys().copied().collect();
        for id in ids {
            self.output(id);
        }
    }

    fn client(&self, id: u64) -> &Client {
        self.arena
            .registry()
            .get(ConnectionId::new(id))
            .expect("registered client")
    }

    fn ids(&self) -> Vec<u64> {
        self.arena
            .registry()
            .ids()
            .into_iter()
            .map(ConnectionId::into_inner)
            .collect()
    }
}

/// Al (1) and Bo (2) in a match. Al acts first. Health: Al 25, Bo 22.
/// Power moves: Al 2, Bo 1.
fn matched() -> Harness {
    let mut h = Harness::new();
    h.join(1, "Al");
    // Bo seeks, Al is found: Bo's numbers are drawn first.
    h.dice.rolls(&[22, 1, 25, 2]);
    h.join(2, "Bo");
    h.drain_all();
    h
}

fn cid(id: u64) -> ConnectionId {
    ConnectionId::new(id)
}

// ---------------------------------------------------------------------------
// Registration and registry membership
// ---------------------------------------------------------------------------

#[test]
fn test_admit_sends_name_prompt() {
    let mut h = Harness::new();
    h.connect(1);

    assert_eq!(h.output(1), "What is your name?\n");
    assert_eq!(h.client(1).state, ClientState::AwaitingRegistration);
}

#[test]
fn test_register_broadcasts_arrival_and_welcomes() {
    let mut h = Harness::new();
    h.join(1, "Al");
    h.output(1);
    h.connect(2);
    h.send(2, "Bo\r\n");

    // Bo is paired with Al straight away; the banner comes first.
    assert!(h.output(1).starts_with("\r\n**Bo joined the area.**\r\n"));
    let bo = h.output(2);
    assert!(bo.contains("**Bo joined the area.**"));
    assert!(bo.contains("\nWelcome, Bo! Awaiting opponent...\n"));
    assert_eq!(h.client(2).name(), Some("Bo"));
}

#[test]
fn test_register_ignores_empty_lines() {
    let mut h = Harness::new();
    h.connect(1);
    h.send(1, "\r\n\r\nAl\r\n");

    assert_eq!(h.client(1).name(), Some("Al"));
    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
}

#[test]
fn test_register_partial_name_waits_for_terminator() {
    let mut h = Harness::new();
    h.connect(1);
    h.send(1, "Al");

    assert_eq!(h.client(1).state, ClientState::AwaitingRegistration);
    h.send(1, "ex\n");
    assert_eq!(h.client(1).name(), Some("Alex"));
}

#[test]
fn test_register_long_name_is_truncated() {
    let mut h = Harness::with_config(ArenaConfig {
        line_capacity: 4,
        ..Default::default()
    });
    h.connect(1);
    h.send(1, "Alexander\n");

    assert_eq!(h.client(1).name(), Some("Alex"));
}

#[test]
fn test_registry_matches_open_connections() {
    let mut h = Harness::new();
    h.connect(1);
    h.connect(2);
    h.connect(3);
    h.close(2);

    assert_eq!(h.ids(), vec![1, 3]);

    h.connect(4);
    h.close(1);
    h.close(4);
    assert_eq!(h.ids(), vec![3]);
}

#[test]
fn test_close_before_registration_says_goodbye_by_address() {
    let mut h = Harness::new();
    h.join(1, "Al");
    h.output(1);
    h.connect(2);
    h.close(2);

    assert_eq!(h.output(1), "Goodbye 10.0.0.2\r\n");
}

#[test]
fn test_disconnect_unknown_id_errors() {
    let mut h = Harness::new();
    assert!(h.arena.disconnect(cid(7)).is_err());
}

// ---------------------------------------------------------------------------
// Matchmaking
// ---------------------------------------------------------------------------

#[test]
fn test_pair_waiting_client_acts_first() {
    let h = matched();

    let al = h.client(1);
    let bo = h.client(2);
    assert_eq!(al.state, ClientState::Acting);
    assert_eq!(bo.state, ClientState::Waiting);
    assert_eq!(al.opponent, Some(cid(2)));
    assert_eq!(bo.opponent, Some(cid(1)));
    assert_eq!((al.health, al.power_moves), (25, 2));
    assert_eq!((bo.health, bo.power_moves), (22, 1));
}

#[test]
fn test_pair_sends_opening_messages() {
    let mut h = Harness::new();
    h.join(1, "Al");
    h.dice.rolls(&[22, 1, 25, 2]);
    h.join(2, "Bo");

    let al = h.output(1);
    assert!(al.contains("\nYou engage Bo!\n"));
    assert!(al.contains("\nYour health:25\nYour powermoves: 2\nBo's health:22\n"));
    assert!(al.contains("(a)ttack"));

    let bo = h.output(2);
    assert!(bo.contains("\nYou engage Al!\n"));
    assert!(bo.contains("\nYour health:22\nYour powermoves: 1\nAl's health:25\n"));
    assert!(bo.contains("Waiting for Al to strike...\n"));
    assert!(!bo.contains("(a)ttack"));
}

#[test]
fn test_pair_clears_mute_flags() {
    let mut h = matched();
    h.send(1, "m\n");
    h.send(1, "mute\n");
    assert!(h.client(1).muting);

    // Bo leaves; Al is paired again with a newcomer.
    h.close(2);
    h.join(3, "Cy");

    assert_eq!(h.client(1).opponent, Some(cid(3)));
    assert!(!h.client(1).muting);
}

#[test]
fn test_pair_leaves_at_most_one_unmatched() {
    let mut h = Harness::new();
    for (id, name) in [(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "E")] {
        h.join(id, name);
    }

    let unmatched = h
        .arena
        .registry()
        .iter()
        .filter(|c| c.state == ClientState::LookingForMatch)
        .count();
    assert_eq!(unmatched, 1);
    for client in h.arena.registry().iter() {
        if let Some(opponent) = client.opponent {
            assert_ne!(opponent, client.id());
            assert_eq!(
                h.arena.registry().get(opponent).unwrap().opponent,
                Some(client.id())
            );
        }
    }
}

#[test]
fn test_pair_skips_last_opponent() {
    let mut h = Harness::with_config(ArenaConfig {
        health: 3..=3,
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.dice.rolls(&[5]);
    h.send(1, "a\n");

    // Match over; both type something to requeue, but not with each other.
    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
    h.send(1, "x\n");
    h.send(2, "x\n");
    assert_eq!(h.client(1).opponent, None);
    assert_eq!(h.client(2).opponent, None);

    h.join(3, "Cy");
    assert_eq!(h.client(3).opponent, Some(cid(1)));
    assert_eq!(h.client(2).state, ClientState::LookingForMatch);
}

#[test]
fn test_pair_looking_client_without_input_stays_queued() {
    let mut h = Harness::new();
    h.join(1, "Al");

    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
    assert!(!h.client(1).is_matched());
    assert!(h.arena.ready().is_empty());
}

// ---------------------------------------------------------------------------
// Combat
// ---------------------------------------------------------------------------

#[test]
fn test_attack_damages_and_passes_turn() {
    let mut h = matched();
    h.dice.rolls(&[4]);
    h.send(1, "a\n");

    assert_eq!(h.client(2).health, 18);
    assert_eq!(h.client(1).state, ClientState::Waiting);
    assert_eq!(h.client(2).state, ClientState::Acting);

    let al = h.output(1);
    assert!(al.contains("You hit Bo for 4 damage!\n"));
    assert!(al.contains("Waiting for Bo to strike...\n"));
    let bo = h.output(2);
    assert!(bo.contains("Al hits you for 4 damage!\n"));
    assert!(bo.contains("\nYour health:18\n"));
    assert!(bo.contains("(a)ttack"));
}

#[test]
fn test_attack_rest_of_line_ignored() {
    let mut h = matched();
    h.dice.rolls(&[2]);
    h.send(1, "attack!!\n");

    assert_eq!(h.client(2).health, 20);
}

#[test]
fn test_attack_partial_line_waits() {
    let mut h = matched();
    h.dice.rolls(&[2]);
    h.send(1, "a");
    assert_eq!(h.client(2).health, 22);

    h.send(1, "\n");
    assert_eq!(h.client(2).health, 20);
}

#[test]
fn test_waiting_input_has_no_effect() {
    let mut h = matched();
    h.send(2, "a\np\n");

    assert_eq!(h.client(1).health, 25);
    assert_eq!(h.client(2).power_moves, 1);
    assert_eq!(h.client(1).state, ClientState::Acting);
    assert_eq!(h.client(2).state, ClientState::Waiting);
    assert_eq!(h.client(2).pending_input(), 0);
}

#[test]
fn test_input_typed_while_waiting_is_not_replayed_on_turn() {
    let mut h = matched();
    h.arena.feed(Inbound {
        id: cid(2),
        event: InboundEvent::Data(b"a\n".to_vec()),
    });
    h.dice.rolls(&[3]);
    h.send(1, "a\n");

    assert_eq!(h.client(1).health, 25);
    assert_eq!(h.client(2).state, ClientState::Acting);
}

#[test]
fn test_unknown_command_keeps_turn() {
    let mut h = matched();
    h.send(1, "x\n");
    h.send(1, "\n");

    assert_eq!(h.client(1).state, ClientState::Acting);
    assert_eq!(h.client(2).health, 22);
    assert_eq!(h.output(2), "");
}

#[test]
fn test_power_move_hit_multiplies_damage() {
    let mut h = matched();
    h.dice.flips(&[true]);
    h.dice.rolls(&[2]);
    h.send(1, "p\n");

    assert_eq!(h.client(2).health, 16);
    assert_eq!(h.client(1).power_moves, 1);
    assert_eq!(h.client(2).state, ClientState::Acting);
    assert!(
        h.output(1)
            .contains("You hit Bo for 6 damage with a power move!\n")
    );
    assert!(
        h.output(2)
            .contains("Al hits you for 6 damage with a power move!\n")
    );
}

#[test]
fn test_power_move_miss_spends_use_and_passes_turn() {
    let mut h = matched();
    h.dice.flips(&[false]);
    h.send(1, "p\n");

    assert_eq!(h.client(2).health, 22);
    assert_eq!(h.client(1).power_moves, 1);
    assert_eq!(h.client(2).state, ClientState::Acting);
    assert!(h.output(1).contains("Unlucky! You missed Bo!\n"));
    assert!(h.output(2).contains("Al missed you! How Lucky!\n"));
}

#[test]
fn test_power_move_without_uses_refused_and_passes_turn() {
    let mut h = Harness::with_config(ArenaConfig {
        power_moves: 0..=0,
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.drain_all();
    let health = h.client(2).health;
    h.send(1, "p\n");

    assert_eq!(h.client(1).power_moves, 0);
    assert_eq!(h.client(2).health, health);
    assert_eq!(h.client(2).state, ClientState::Acting);
    assert!(h.output(1).contains("You are out of power moves!\n"));
}

#[test]
fn test_kill_ends_match_once() {
    let mut h = Harness::with_config(ArenaConfig {
        health: 5..=5,
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.drain_all();
    h.dice.flips(&[true]);
    h.dice.rolls(&[3]);
    h.send(1, "p\n");

    let bo = h.client(2);
    assert!(bo.health <= 0);
    assert_eq!(bo.state, ClientState::LookingForMatch);
    assert_eq!(bo.opponent, None);
    assert_eq!(bo.last_played, Some(cid(1)));
    let al = h.client(1);
    assert_eq!(al.state, ClientState::LookingForMatch);
    assert_eq!(al.opponent, None);
    assert_eq!(al.last_played, Some(cid(2)));

    let al_out = h.output(1);
    assert_eq!(al_out.matches("Bo is dead!. You win!\n").count(), 1);
    assert!(al_out.contains("Awaiting opponent...\n"));
    assert!(al_out.contains("Type anything to find a new match...: \n"));
    let bo_out = h.output(2);
    assert_eq!(bo_out.matches("You are dead!. Al is VICTORIUS!...\n").count(), 1);
    assert!(!bo_out.contains("(a)ttack"));
}

#[test]
fn test_scenario_full_match_alternates_until_death() {
    let mut h = Harness::with_config(ArenaConfig {
        health: 10..=10,
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.dice.rolls(&[6, 6, 6, 6]);

    h.send(1, "a\n");
    assert_eq!(h.client(2).state, ClientState::Acting);
    h.send(2, "a\n");
    assert_eq!(h.client(1).state, ClientState::Acting);
    h.send(1, "a\n");

    assert_eq!(h.client(2).health, -2);
    assert_eq!(h.client(1).health, 4);
    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
    assert_eq!(h.client(2).state, ClientState::LookingForMatch);
}

// ---------------------------------------------------------------------------
// Chat and mute
// ---------------------------------------------------------------------------

#[test]
fn test_speak_relays_line_and_reannounces_turn() {
    let mut h = matched();
    h.send(1, "s\n");
    assert_eq!(
        h.client(1).state,
        ClientState::Composing {
            resume: Resume::Acting,
            purpose: Purpose::Speech,
        }
    );
    assert_eq!(h.client(2).state, ClientState::Waiting);
    assert_eq!(h.output(1), "\nSpeak: ");

    h.send(1, "hello\n");

    assert_eq!(
        h.output(2),
        "\nAl says: hello\n\n\
         \nYour health:22\nYour powermoves: 1\nAl's health:25\n\
         Waiting for Al to strike...\n"
    );
    assert_eq!(
        h.output(1),
        "\n\
         \nYour health:25\nYour powermoves: 2\nBo's health:22\n\
         \n(a)ttack\n(p)owermove\n(s)peak something\n(m)mute opponent\n\n"
    );
    assert_eq!(h.client(1).state, ClientState::Acting);
    assert_eq!(h.client(2).state, ClientState::Waiting);
}

#[test]
fn test_mute_confirmation_reannounces_turn() {
    let mut h = matched();
    h.send(1, "m\nmute\n");

    let al = h.output(1);
    let bo = h.output(2);
    assert!(al.contains("\nYou are now muting Bo!\n"));
    assert!(al.ends_with("(m)mute opponent\n\n"));
    assert!(bo.contains("Waiting for Al to strike...\n"));
    assert!(!bo.contains("(a)ttack"));
    assert_eq!(h.client(1).state, ClientState::Acting);
    assert_eq!(h.client(2).state, ClientState::Waiting);
}

#[test]
fn test_speak_does_not_echo_or_consume_turn() {
    let mut h = matched();
    h.send(1, "s\nhi there\n");
    h.dice.rolls(&[1]);
    h.send(1, "a\n");

    assert_eq!(h.client(2).health, 21);
    assert!(!h.output(1).contains("says:"));
}

#[test]
fn test_waiting_side_input_during_compose_is_dropped() {
    let mut h = matched();
    h.send(1, "s\n");
    h.send(2, "a\n");
    h.send(1, "ok\n");

    assert_eq!(h.client(1).health, 25);
    assert_eq!(h.client(2).state, ClientState::Waiting);
}

#[test]
fn test_mute_twice_restores_flag() {
    let mut h = matched();
    h.send(1, "m\n");
    assert!(h.output(1).contains("type (mute) to confirm: "));
    h.send(1, "mute\n");
    assert!(h.client(1).muting);
    assert!(h.output(1).contains("\nYou are now muting Bo!\n"));

    h.send(1, "m\nmute\n");
    assert!(!h.client(1).muting);
    assert!(h.output(1).contains("\nYou are no longer muting Bo!\n"));
    assert!(!h.output(2).contains("muting"));
    assert_eq!(h.client(1).state, ClientState::Acting);
}

#[test]
fn test_mute_without_confirmation_cancels() {
    let mut h = matched();
    h.send(1, "m\nno thanks\n");

    assert!(!h.client(1).muting);
    assert!(h.output(1).contains("\nMute cancelled.\n"));
    assert!(!h.output(2).contains("mute"));
}

#[test]
fn test_muted_chat_is_not_delivered() {
    let mut h = matched();
    h.dice.rolls(&[1, 1]);
    h.send(1, "a\n");
    // Bo's turn: Bo mutes Al, then hands the turn back.
    h.send(2, "m\nmute\n");
    h.send(2, "a\n");
    h.drain_all();

    h.send(1, "s\nlet me talk\n");

    assert!(!h.output(2).contains("says"));
    assert_eq!(h.client(1).state, ClientState::Acting);
}

#[test]
fn test_cheat_hook_disabled_by_default() {
    let mut h = matched();
    h.send(1, "s\nxyz\n");

    assert_eq!(h.client(1).power_moves, 2);
    assert!(h.output(2).starts_with("\nAl says: xyz\n\n"));
}

#[test]
fn test_cheat_hook_grants_power_moves() {
    let mut h = Harness::with_config(ArenaConfig {
        cheat: Some(CheatHook::new("xyz")),
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.drain_all();
    h.send(1, "s\nplugh xyzzy\n");

    assert_eq!(h.client(1).power_moves, 20);
    assert!(
        h.output(1)
            .contains("Cheat activated: Power moves set to 20!\n")
    );
    assert!(!h.output(2).contains("says"));
    assert_eq!(h.client(1).state, ClientState::Acting);
}

#[test]
fn test_cheat_hook_on_mute_line_also_toggles_mute() {
    let mut h = Harness::with_config(ArenaConfig {
        cheat: Some(CheatHook::new("xyz")),
        ..Default::default()
    });
    h.join(1, "Al");
    h.join(2, "Bo");
    h.drain_all();
    h.send(1, "m\nmute xyz\n");

    assert_eq!(h.client(1).power_moves, 20);
    assert!(h.client(1).muting);
    let al = h.output(1);
    assert!(al.contains("Cheat activated: Power moves set to 20!\n"));
    assert!(al.contains("\nYou are now muting Bo!\n"));
}

// ---------------------------------------------------------------------------
// Disconnects
// ---------------------------------------------------------------------------

#[test]
fn test_disconnect_while_waiting_requeues_opponent() {
    let mut h = matched();
    h.close(2);

    assert_eq!(h.ids(), vec![1]);
    let al = h.client(1);
    assert_eq!(al.state, ClientState::LookingForMatch);
    assert_eq!(al.opponent, None);
    assert_eq!(al.last_played, Some(cid(2)));

    let out = h.output(1);
    assert!(out.contains("Bo has left the game!!\n"));
    assert!(out.contains("Awaiting opponent...\n"));
    assert!(out.contains("Goodbye Bo\r\n"));
}

#[test]
fn test_disconnect_while_acting_requeues_opponent() {
    let mut h = matched();
    h.close(1);

    assert_eq!(h.ids(), vec![2]);
    assert_eq!(h.client(2).state, ClientState::LookingForMatch);
    assert_eq!(h.client(2).opponent, None);
    assert!(h.output(2).contains("Al has left the game!!\n"));
}

#[test]
fn test_disconnect_survivor_is_not_auto_requeued() {
    let mut h = matched();
    h.join(3, "Cy");
    h.close(2);

    assert_eq!(h.client(1).opponent, None);
    assert_eq!(h.client(3).opponent, None);

    h.send(1, "\n");
    assert_eq!(h.client(1).opponent, Some(cid(3)));
}

#[test]
fn test_disconnect_mid_compose_returns_composer_to_queue() {
    let mut h = matched();
    h.send(1, "s\nhal");
    h.close(2);

    assert_eq!(
        h.client(1).state,
        ClientState::Composing {
            resume: Resume::LookingForMatch,
            purpose: Purpose::Speech,
        }
    );
    h.send(1, "f\n");
    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
}

#[test]
fn test_line_then_close_processes_line_first() {
    let mut h = matched();
    h.dice.rolls(&[5]);
    h.arena.feed(Inbound {
        id: cid(1),
        event: InboundEvent::Data(b"a\n".to_vec()),
    });
    h.close(1);

    assert_eq!(h.ids(), vec![2]);
    assert!(h.output(2).contains("Al hits you for 5 damage!\n"));
}

#[test]
fn test_failed_write_disconnects_client() {
    let mut h = matched();
    drop(h.outputs.remove(&2));

    // Al's attack notifies Bo; the failed write hangs Bo up.
    h.dice.rolls(&[1]);
    h.send(1, "a\n");

    assert_eq!(h.ids(), vec![1]);
    assert_eq!(h.client(1).state, ClientState::LookingForMatch);
}
