//! The duelling bot: FSM for life and death, fuzzy weapon choice, and goal
//! arbitration between closing in, attacking and backing off.

use ga_agent::Agent;
use ga_core::{AgentId, AgentRng, Regulator, SimTime, ToolkitConfig, Vector2D};
use ga_fsm::{State, StateMachine, StateMachineExt, Stateful};
use ga_goal::{
    Arbitrator, FnEvaluator, WeaponProfile, WeaponRules, WeaponSelector, WeaponSlot, feature,
    random_bias,
};
use ga_message::{GameMessage, Telegram};
use ga_sim::{AgentContext, SimAgent, SimResult};
use tracing::{debug, info, warn};

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const MAX_HEALTH:     u32 = 100;
const MOVE_SPEED:         f64 = 80.0;  // units per second
const REGEN_PER_SEC:      f64 = 6.0;   // health while retreating
const FIRE_INTERVAL_SECS: f64 = 0.5;
const RESPAWN_SECS:       f64 = 2.0;
const MAX_RANGE:          f64 = 1000.0;
const ARENA:              (f64, f64) = (-400.0, 1400.0);

/// What the bot is currently trying to do, chosen by arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tactic {
    #[default]
    Approach,
    Attack,
    Retreat,
}

pub struct Bot {
    id:       AgentId,
    pub name: &'static str,
    pub pos:  Vector2D,
    opponent: AgentId,

    pub health: u32,
    regen:      f64,
    pub kills:  u32,
    pub deaths: u32,
    pub shots:  u32,
    pub tactic: Tactic,

    pub weapons:     WeaponSelector,
    ammo_caps:       Vec<Option<u32>>,
    target_distance: f64,
    next_shot:       SimTime,
    respawn_at:      SimTime,

    fsm:        StateMachine<Bot>,
    arbitrator: Arbitrator<Bot>,
    weapon_reg: Regulator,
    goal_reg:   Regulator,
    rng:        AgentRng,
}

impl Bot {
    pub fn new(
        id:       AgentId,
        name:     &'static str,
        pos:      Vector2D,
        opponent: AgentId,
        config:   &ToolkitConfig,
    ) -> anyhow::Result<Self> {
        let mut rng = AgentRng::new(config.world.seed, id);

        let mut weapons = WeaponSelector::new();
        weapons.add(WeaponSlot {
            profile: WeaponProfile::new("Railgun", WeaponRules::railgun())?,
            ammo: Some(10),
            damage: 25,
            secs_per_unit: 0.0,
        });
        weapons.add(WeaponSlot {
            profile: WeaponProfile::new("RocketLauncher", WeaponRules::rocket_launcher())?,
            ammo: Some(20),
            damage: 15,
            secs_per_unit: 0.004,
        });
        weapons.add(WeaponSlot {
            profile: WeaponProfile::new("Shotgun", WeaponRules::shotgun())?,
            ammo: Some(30),
            damage: 20,
            secs_per_unit: 0.0,
        });
        let ammo_caps = weapons.slots().iter().map(|s| s.ammo).collect();

        let arbitrator = Arbitrator::new()
            .with(FnEvaluator::new(
                "Approach",
                random_bias(&mut rng, &config.arbitration)?,
                approach_desirability,
                |b: &mut Bot| b.tactic = Tactic::Approach,
            ))
            .with(FnEvaluator::new(
                "Attack",
                random_bias(&mut rng, &config.arbitration)?,
                attack_desirability,
                |b: &mut Bot| b.tactic = Tactic::Attack,
            ))
            .with(FnEvaluator::new(
                "Retreat",
                random_bias(&mut rng, &config.arbitration)?,
                retreat_desirability,
                |b: &mut Bot| b.tactic = Tactic::Retreat,
            ));

        let dither = config.regulator.dither_secs;
        let weapon_reg = Regulator::new(config.arbitration.weapon_updates_per_sec, dither)
            .staggered(SimTime::ZERO, &mut rng);
        let goal_reg = Regulator::new(config.arbitration.goal_updates_per_sec, dither)
            .staggered(SimTime::ZERO, &mut rng);

        let mut fsm = StateMachine::with_initial(&HUNTING);
        fsm.set_global_state(Some(&COMBATANT));

        Ok(Bot {
            id,
            name,
            pos,
            opponent,
            health: MAX_HEALTH,
            regen: 0.0,
            kills: 0,
            deaths: 0,
            shots: 0,
            tactic: Tactic::default(),
            weapons,
            ammo_caps,
            target_distance: MAX_RANGE,
            next_shot: SimTime::ZERO,
            respawn_at: SimTime::ZERO,
            fsm,
            arbitrator,
            weapon_reg,
            goal_reg,
            rng,
        })
    }

    pub fn state_name(&self) -> &'static str {
        self.fsm.current_state_name().unwrap_or("-")
    }

    pub fn weapon_name(&self) -> &str {
        self.weapons.current().map_or("-", |w| w.profile.name())
    }

    fn is_alive(&self) -> bool {
        self.fsm.is_in_state::<Hunting>()
    }

    fn arsenal_strength(&self) -> f64 {
        feature::total_weapon_strength(self.weapons.slots().iter().zip(&self.ammo_caps).map(
            |(slot, cap)| {
                let cap = cap.unwrap_or(100);
                (slot.ammo.unwrap_or(cap), cap)
            },
        ))
    }

    /// Regulated perception and decision making.  Runs before the FSM so the
    /// current state acts on fresh choices.
    fn think(&mut self, ctx: &AgentContext<'_, Bot>) -> SimResult<()> {
        if !self.is_alive() {
            return Ok(());
        }
        let Some(target) = ctx.resolve(self.opponent) else {
            return Ok(());
        };
        self.target_distance = self.pos.distance(target.pos);

        if self.weapon_reg.is_ready(ctx.now, &mut self.rng) {
            self.weapons.select(self.target_distance)?;
        }
        if self.goal_reg.is_ready(ctx.now, &mut self.rng) {
            // The arbitrator scores `self`, so it is lifted out for the call.
            let arbitrator = std::mem::take(&mut self.arbitrator);
            arbitrator.arbitrate(self);
            self.arbitrator = arbitrator;
        }
        Ok(())
    }

    fn step_towards(&mut self, target: Vector2D, speed: f64, dt: f64) {
        let dir = (target - self.pos).normalized();
        self.pos = self.pos + dir * (speed * dt);
        self.pos.x = self.pos.x.clamp(ARENA.0, ARENA.1);
    }

    fn fire(&mut self, ctx: &mut AgentContext<'_, Bot>) {
        if ctx.now.total_cmp(&self.next_shot).is_lt() {
            return;
        }
        let distance = self.target_distance;
        let Some(weapon) = self.weapons.current_mut() else {
            return;
        };
        if !weapon.consume() {
            return;
        }
        let (damage, flight) = (weapon.damage, distance * weapon.secs_per_unit);
        debug!(bot = self.name, weapon = weapon.profile.name(), distance, flight, "fire");
        ctx.send(flight, self.opponent, GameMessage::TakeDamage { amount: damage });
        self.shots += 1;
        self.next_shot = ctx.now + FIRE_INTERVAL_SECS;
    }

    fn respawn(&mut self) {
        self.health = MAX_HEALTH;
        self.regen = 0.0;
        self.tactic = Tactic::default();
        for (i, cap) in self.ammo_caps.iter().enumerate() {
            if let Ok(slot) = self.weapons.slot_mut(i) {
                slot.ammo = *cap;
            }
        }
    }
}

// ── Evaluators ────────────────────────────────────────────────────────────────

fn approach_desirability(bot: &Bot) -> f64 {
    0.9 * feature::distance_score(bot.target_distance, MAX_RANGE)
}

fn attack_desirability(bot: &Bot) -> f64 {
    let health = feature::health(bot.health, MAX_HEALTH);
    0.8 * bot.arsenal_strength() * (0.5 + 0.5 * health)
}

fn retreat_desirability(bot: &Bot) -> f64 {
    0.7 * (1.0 - feature::health(bot.health, MAX_HEALTH))
}

// ── Agent impls ───────────────────────────────────────────────────────────────

impl Agent for Bot {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vector2D {
        self.pos
    }

    fn bounding_radius(&self) -> f64 {
        5.0
    }
}

impl Stateful for Bot {
    type Message = GameMessage;
    type Context<'a> = AgentContext<'a, Bot>;

    fn state_machine(&self) -> &StateMachine<Self> {
        &self.fsm
    }

    fn state_machine_mut(&mut self) -> &mut StateMachine<Self> {
        &mut self.fsm
    }
}

impl SimAgent for Bot {
    type Message = GameMessage;

    fn update(&mut self, ctx: &mut AgentContext<'_, Bot>) -> SimResult<()> {
        self.think(ctx)?;
        self.update_states(ctx)?;
        Ok(())
    }

    fn handle_message(&mut self, telegram: &Telegram<GameMessage>, ctx: &mut AgentContext<'_, Bot>) -> bool {
        self.handle_state_message(telegram, ctx)
    }
}

// ── States ────────────────────────────────────────────────────────────────────

pub struct Hunting;
pub struct Dead;
pub struct Combatant;

static HUNTING: Hunting = Hunting;
static DEAD: Dead = Dead;
static COMBATANT: Combatant = Combatant;

impl State<Bot> for Hunting {
    fn name(&self) -> &'static str {
        "Hunting"
    }

    fn execute(&self, bot: &mut Bot, ctx: &mut AgentContext<'_, Bot>) {
        let Some(target) = ctx.resolve(bot.opponent).map(|o| o.pos) else {
            return;
        };
        match bot.tactic {
            Tactic::Approach => bot.step_towards(target, MOVE_SPEED, ctx.dt),
            Tactic::Attack => bot.fire(ctx),
            Tactic::Retreat => {
                bot.step_towards(target, -MOVE_SPEED, ctx.dt);
                bot.regen += REGEN_PER_SEC * ctx.dt;
                let whole = bot.regen.floor();
                bot.regen -= whole;
                bot.health = (bot.health + whole as u32).min(MAX_HEALTH);
            }
        }
    }

    fn on_message(&self, bot: &mut Bot, telegram: &Telegram<GameMessage>, ctx: &mut AgentContext<'_, Bot>) -> bool {
        let GameMessage::TakeDamage { amount } = telegram.message else {
            return false;
        };
        bot.health = bot.health.saturating_sub(amount);
        debug!(bot = bot.name, amount, health = bot.health, "hit");
        if bot.health == 0 {
            if let Err(e) = bot.change_state(&DEAD, ctx) {
                warn!(bot = bot.name, error = %e, "could not enter Dead");
            }
            ctx.send(0.0, telegram.sender, GameMessage::YouGotMe);
        }
        true
    }
}

impl State<Bot> for Dead {
    fn name(&self) -> &'static str {
        "Dead"
    }

    fn enter(&self, bot: &mut Bot, ctx: &mut AgentContext<'_, Bot>) {
        bot.deaths += 1;
        bot.respawn_at = ctx.now + RESPAWN_SECS;
        info!(bot = bot.name, at = %ctx.now, deaths = bot.deaths, "killed");
    }

    fn execute(&self, bot: &mut Bot, ctx: &mut AgentContext<'_, Bot>) {
        if ctx.now.total_cmp(&bot.respawn_at).is_ge() {
            bot.respawn();
            if let Err(e) = bot.change_state(&HUNTING, ctx) {
                warn!(bot = bot.name, error = %e, "could not respawn");
            }
        }
    }

    fn exit(&self, bot: &mut Bot, ctx: &mut AgentContext<'_, Bot>) {
        info!(bot = bot.name, at = %ctx.now, "respawned");
    }

    // Shots still in flight land on a corpse.
    fn on_message(&self, _bot: &mut Bot, telegram: &Telegram<GameMessage>, _ctx: &mut AgentContext<'_, Bot>) -> bool {
        matches!(telegram.message, GameMessage::TakeDamage { .. })
    }
}

impl State<Bot> for Combatant {
    fn name(&self) -> &'static str {
        "Combatant"
    }

    fn on_message(&self, bot: &mut Bot, telegram: &Telegram<GameMessage>, _ctx: &mut AgentContext<'_, Bot>) -> bool {
        if telegram.message != GameMessage::YouGotMe {
            return false;
        }
        bot.kills += 1;
        info!(bot = bot.name, victim = %telegram.sender, kills = bot.kills, "kill confirmed");
        true
    }
}
