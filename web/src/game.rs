use crate::utils::*;
use clap::{Args, ValueEnum};
use gloo::timers::callback::Timeout;
use threatsim_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum RulesetArg {
    /// Several bombs, 15% to 25% of the grid
    #[default]
    Scatter,
    /// One bomb that infects its neighbours
    Infection,
}

impl From<RulesetArg> for game::Ruleset {
    fn from(arg: RulesetArg) -> Self {
        match arg {
            RulesetArg::Scatter => game::Ruleset::Scatter,
            RulesetArg::Infection => game::Ruleset::Infection,
        }
    }
}

/// Parses `row,col`.
fn parse_coords(value: &str) -> Result<game::Coord2, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{value}`"))?;
    let row: game::Coord = row.trim().parse().map_err(|err| format!("bad row: {err}"))?;
    let col: game::Coord = col.trim().parse().map_err(|err| format!("bad col: {err}"))?;
    Ok((row, col))
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Tag bomb cells with `data-bomb-testid` for automated testing
    #[arg(long)]
    pub expose_bombs: bool,

    /// Starting grid size, the difficulty selector can change it later
    #[arg(long, default_value_t = game::Difficulty::Medium.grid_size())]
    pub size: game::Coord,

    /// Bomb placement rules
    #[arg(long, value_enum, default_value_t)]
    pub ruleset: RulesetArg,

    /// Bomb location for the first infection round, as `row,col`
    #[arg(long, value_parser = parse_coords)]
    pub bomb: Option<game::Coord2>,
}

impl GameProps {
    fn game_config(&self) -> game::GameConfig {
        let config = game::GameConfig::new(self.size, self.ruleset.into())
            .with_expose_bombs(self.expose_bombs);
        match self.bomb {
            Some(bomb) => config.with_initial_bomb_location(bomb).unwrap_or_else(|err| {
                log::error!("ignoring bomb location {:?}: {}", bomb, err);
                config
            }),
            None => config,
        }
    }
}

const fn difficulty_test_id(difficulty: game::Difficulty) -> &'static str {
    use game::Difficulty::*;
    match difficulty {
        Easy => "easy-option",
        Medium => "medium-option",
        Hard => "hard-option",
    }
}

fn parse_difficulty(value: &str) -> Option<game::Difficulty> {
    value
        .parse()
        .ok()
        .and_then(game::Difficulty::from_grid_size)
}

const fn banner_title(banner: game::Banner) -> &'static str {
    use game::Banner::*;
    match banner {
        ConfirmReset => "🔄 Reset Game?",
        Won { .. } => "🎉 You Win!",
        Lost { .. } => "💥 Game Over!",
    }
}

fn restart_text(restart_in: u8) -> String {
    format!("Game restarting in {}...", restart_in)
}

fn custom_difficulty_label(size: game::Coord) -> String {
    format!("Custom ({size} x {size})")
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::Coord2),
    Tick,
    RequestReset,
    ConfirmReset,
    CancelReset,
    SetDifficulty(game::Difficulty),
}

/// Applies a message to the session, returns whether anything visible changed.
fn apply_msg<S: game::BombSource>(session: &mut game::GameSession<S>, msg: Msg) -> bool {
    use Msg::*;

    match msg {
        Reveal(pos) if session.is_confirming_reset() => {
            log::debug!("ignoring reveal at {:?} while a reset is pending", pos);
            false
        }
        Reveal(pos) => {
            log::debug!("reveal cell: {:?}", pos);
            session.reveal(pos).map_or_else(
                |err| {
                    log::error!("reveal at {:?} failed: {}", pos, err);
                    false
                },
                |outcome| outcome.has_update(),
            )
        }
        Tick => session.tick().has_update(),
        RequestReset => session.request_reset(),
        ConfirmReset => session.confirm_reset(),
        CancelReset => session.cancel_reset(),
        SetDifficulty(difficulty) => {
            log::debug!("difficulty: {:?}", difficulty);
            session.set_difficulty(difficulty);
            true
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum TimerAction {
    /// Leave the pending tick, if any, alone.
    Keep,
    /// Replace the pending tick with a fresh one.
    Schedule,
    /// Drop the pending tick.
    Cancel,
}

/// What to do with the countdown timer after `msg` moved the countdown from `before` to `after`.
fn timer_action(msg: Msg, before: Option<u8>, after: Option<u8>) -> TimerAction {
    match after {
        None if before.is_some() => TimerAction::Cancel,
        // a fired tick consumed its timer
        Some(_) if matches!(msg, Msg::Tick) || before != after => TimerAction::Schedule,
        _ => TimerAction::Keep,
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    tile: game::TileView,
    #[prop_or_default]
    exposed_bomb: bool,
    #[prop_or_default]
    triggered: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use game::TileView::*;

    let CellProps {
        row,
        col,
        tile,
        exposed_bomb,
        triggered,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        tile.is_revealed().then_some("revealed"),
        match tile {
            Bomb => Some("bomb"),
            Infected => Some("infected"),
            Hidden | Safe => None,
        },
        triggered.then_some("triggered"),
    );
    let content = match tile {
        Bomb => "💣",
        Infected => "🦠",
        Hidden | Safe => "",
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) clicked", row, col);
        callback.emit((row, col));
    });

    html! {
        <td
            {class}
            {onclick}
            data-testid={format!("{}-{}", row, col)}
            data-bomb-testid={exposed_bomb.then_some("bomb")}
        >
            {content}
        </td>
    }
}

pub(crate) struct GameView {
    session: game::GameSession,
    countdown_timer: Option<Timeout>,
}

impl GameView {
    /// Replaces the pending tick, dropping the old timer cancels it.
    fn schedule_tick(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self.countdown_timer = Some(Timeout::new(game::Countdown::TICK_MILLIS, move || {
            link.send_message(Msg::Tick)
        }));
    }

    fn sync_countdown_timer(&mut self, ctx: &Context<Self>, action: TimerAction) {
        match action {
            TimerAction::Keep => {}
            TimerAction::Schedule => {
                log::trace!("next countdown tick scheduled, {:?} left", self.session.countdown());
                self.schedule_tick(ctx);
            }
            TimerAction::Cancel => {
                log::trace!("countdown tick cancelled");
                self.countdown_timer = None;
            }
        }
    }

    fn view_popup(&self, ctx: &Context<Self>) -> Html {
        let Some(banner) = self.session.banner() else {
            return html! {};
        };

        let body = match banner {
            game::Banner::ConfirmReset => html! {
                <>
                    <p>{"This will start a new game. Are you sure you want to continue?"}</p>
                    <button onclick={ctx.link().callback(|_| Msg::ConfirmReset)}>{"Yes"}</button>
                    <button onclick={ctx.link().callback(|_| Msg::CancelReset)}>{"No"}</button>
                </>
            },
            game::Banner::Won { restart_in } | game::Banner::Lost { restart_in } => html! {
                <p>{restart_text(restart_in)}</p>
            },
        };

        html! {
            <Modal>
                <div class="popup">
                    <div class="popup-content">
                        <h2>{banner_title(banner)}</h2>
                        {body}
                    </div>
                </div>
            </Modal>
        }
    }

    fn view_rules(&self) -> Html {
        let bomb_rule = match self.session.engine().ruleset() {
            game::Ruleset::Scatter => "Avoid the 💣",
            game::Ruleset::Infection => "Avoid the 💣, it infects every tile around it",
        };

        html! {
            <aside class="sidebar rules">
                <h2>{"Game Rules"}</h2>
                <ul>
                    <li>{"Click on a tile to reveal it"}</li>
                    <li>{bomb_rule}</li>
                    <li>{"Reveal all the safe cells to win"}</li>
                    <li>{"You can change the game difficulty mode"}</li>
                </ul>
            </aside>
        }
    }

    fn view_scoreboard(&self) -> Html {
        let scoreboard = self.session.scoreboard();

        html! {
            <aside class="sidebar scoreboard">
                <h2>{"Scoreboard"}</h2>
                <p>{format!("🎉 Wins: {}", scoreboard.wins())}</p>
                <p>{format!("💥 Losses: {}", scoreboard.losses())}</p>
            </aside>
        }
    }

    fn view_difficulty(&self, ctx: &Context<Self>) -> Html {
        let current = self.session.difficulty();
        let custom = current.is_none().then(|| {
            let label = custom_difficulty_label(self.session.grid_size());
            html! {
                <option value="" disabled=true selected=true data-testid="custom-option">
                    {format!("🎯 Difficulty Level: {}", label)}
                </option>
            }
        });
        let onchange = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let difficulty = parse_difficulty(&select.value());
            if difficulty.is_none() {
                log::error!("unknown difficulty option: {:?}", select.value());
            }
            difficulty.map(Msg::SetDifficulty)
        });

        html! {
            <div class="difficulty">
                <select data-testid="difficulty-select" {onchange}>
                    {for custom}
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| html! {
                            <option
                                value={difficulty.grid_size().to_string()}
                                selected={current == Some(difficulty)}
                                data-testid={difficulty_test_id(difficulty)}
                            >
                                {format!("🎯 Difficulty Level: {}", difficulty.label())}
                            </option>
                        })
                    }
                </select>
            </div>
        }
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let size = self.session.grid_size();
        let playable = !self.session.is_game_over();

        html! {
            <table class={classes!("grid", playable.then_some("playable"))}>
                {
                    for (0..size).map(|row| html! {
                        <tr>
                            {
                                for (0..size).map(|col| {
                                    let pos = (row, col);
                                    let tile = self.session.tile_at(pos);
                                    let exposed_bomb = self.session.exposes_bomb_at(pos);
                                    let triggered = self.session.is_triggered_bomb(pos);
                                    let callback = ctx.link().callback(Msg::Reveal);
                                    html! {
                                        <CellView {row} {col} {tile} {exposed_bomb} {triggered} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            session: game::GameSession::seeded(props.game_config(), seed),
            countdown_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let countdown_before = self.session.countdown();
        let updated = apply_msg(&mut self.session, msg);
        let action = timer_action(msg, countdown_before, self.session.countdown());
        self.sync_countdown_timer(ctx, action);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="threatsim">
                {self.view_rules()}
                <main>
                    <h1>{"Threat Simulator"}</h1>
                    {self.view_popup(ctx)}
                    <div class="game-wrapper">
                        {self.view_difficulty(ctx)}
                        {self.view_grid(ctx)}
                        <div class="reset">
                            <button onclick={ctx.link().callback(|_| Msg::RequestReset)}>
                                {"🔄 Reset Game"}
                            </button>
                        </div>
                    </div>
                </main>
                {self.view_scoreboard()}
            </div>
        }
    }
}
