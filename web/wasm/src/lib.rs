use montana::{
    Card, CardMove, DealEvent, Game, GameOptions, GamePhase, Location, Move, SlotId, Suit,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self {
            game: Game::new(GameOptions::default(), seed as u64),
        }
    }

    pub fn reset(&mut self, seed: u32) {
        self.game = Game::new(GameOptions::default(), seed as u64);
    }

    pub fn needs_confirmation(&self) -> bool {
        self.game.needs_confirmation()
    }

    pub fn new_game(&self) -> Result<(), JsValue> {
        self.game.start_new_game().map_err(js_err)
    }

    pub fn shuffle(&self) -> Result<u32, JsValue> {
        self.game
            .request_shuffle()
            .map(|left| left as u32)
            .map_err(js_err)
    }

    /// Runs one deal step; the page calls this from a timer to animate.
    pub fn step(&self) -> Result<JsValue, JsValue> {
        let event = self.game.step().map_err(js_err)?;
        to_js_value(&event.map(JsDealEvent::from))
    }

    pub fn step_delay_ms(&self) -> u32 {
        self.game.options.step_delay.as_millis() as u32
    }

    pub fn finish_dealing(&self) -> Result<(), JsValue> {
        self.game.finish_dealing().map(|_| ()).map_err(js_err)
    }

    pub fn activate(&self, index: u32) -> Result<JsValue, JsValue> {
        let id = SlotId::from_index(index as usize)
            .ok_or_else(|| JsValue::from_str("slot out of range"))?;
        let mv = self.game.activate_slot(id).map_err(js_err)?;
        to_js_value(&self.move_to_js(mv))
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let slots = self
            .game
            .board_snapshot()
            .iter()
            .map(|card| card.map(|card| self.card_to_js(card)))
            .collect();

        let snapshot = Snapshot {
            phase: phase_to_str(self.game.phase()),
            slots,
            shuffles_left: self.game.shuffles_left() as u32,
            stock: self.game.stock_len() as u32,
            pending_steps: self.game.pending_steps() as u32,
        };

        to_js_value(&snapshot)
    }
}

impl WasmGame {
    /// Reads the moved card's flags after the move, so a card that just
    /// completed a row reports as marked.
    fn move_to_js(&self, mv: Move) -> JsMove {
        JsMove {
            card: self.card_to_js(mv.card),
            from: mv.from.index() as u32,
            to: mv.to.index() as u32,
            won: mv.won,
        }
    }

    fn card_to_js(&self, card: Card) -> JsCard {
        JsCard {
            marked: self.game.is_marked(card),
            face_up: self.game.is_face_up(card),
            ..card_to_js(card)
        }
    }
}

#[derive(Serialize)]
struct Snapshot {
    phase: &'static str,
    slots: Vec<Option<JsCard>>,
    shuffles_left: u32,
    stock: u32,
    pending_steps: u32,
}

#[derive(Serialize)]
struct JsCard {
    suit: &'static str,
    rank: &'static str,
    marked: bool,
    face_up: bool,
}

#[derive(Serialize)]
struct JsMove {
    card: JsCard,
    from: u32,
    to: u32,
    won: bool,
}

#[derive(Serialize)]
struct JsCardMove {
    card: JsCard,
    from: Option<u32>,
    to: Option<u32>,
}

impl From<CardMove> for JsCardMove {
    fn from(card_move: CardMove) -> Self {
        Self {
            card: card_to_js(card_move.card),
            from: location_to_js(card_move.from),
            to: location_to_js(card_move.to),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind")]
enum JsDealEvent {
    Dealt(JsCardMove),
    Discarded(JsCardMove),
    Settled { phase: &'static str },
}

impl From<DealEvent> for JsDealEvent {
    fn from(event: DealEvent) -> Self {
        match event {
            DealEvent::Dealt(card_move) => Self::Dealt(card_move.into()),
            DealEvent::Discarded(card_move) => Self::Discarded(card_move.into()),
            DealEvent::Settled(phase) => Self::Settled {
                phase: phase_to_str(phase),
            },
        }
    }
}

fn card_to_js(card: Card) -> JsCard {
    JsCard {
        suit: suit_to_str(card.suit),
        rank: card.rank.label(),
        marked: false,
        face_up: true,
    }
}

/// Stock is reported as `null`; grid slots by row-major index.
fn location_to_js(location: Location) -> Option<u32> {
    location.slot().map(|id| id.index() as u32)
}

fn suit_to_str(suit: Suit) -> &'static str {
    match suit {
        Suit::Spades => "Spades",
        Suit::Hearts => "Hearts",
        Suit::Diamonds => "Diamonds",
        Suit::Clubs => "Clubs",
    }
}

fn phase_to_str(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Idle => "Idle",
        GamePhase::Dealing => "Dealing",
        GamePhase::Playing => "Playing",
        GamePhase::Won => "Won",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
