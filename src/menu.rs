//! Menu overlay shown between rounds.
//!
//! The finished round stays on screen, frozen, under a translucent panel with
//! a single START control.  Clicking it (or pressing Enter) writes
//! [`StartRequested`]; the phase machine does the rest.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System               | Schedule               | Purpose                       |
//! |----------------------|------------------------|-------------------------------|
//! | `setup_menu`         | `OnEnter(Menu)`        | Spawn overlay UI              |
//! | `cleanup_menu`       | `OnExit(Menu)`         | Despawn overlay UI            |
//! | `menu_button_system` | `Update / in Menu`     | Start on click or Enter       |

use crate::phase::{GamePhase, StartRequested};
use bevy::prelude::*;

/// Root node of the overlay; the whole tree is despawned on `OnExit(Menu)`.
#[derive(Component)]
pub struct MenuRoot;

/// Tags the START button.
#[derive(Component)]
pub struct MenuStartButton;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GamePhase::Menu), setup_menu)
            .add_systems(OnExit(GamePhase::Menu), cleanup_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GamePhase::Menu)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn overlay_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.6)
}
fn start_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn start_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn start_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn hint_color() -> Color {
    Color::srgb(0.45, 0.45, 0.55)
}

// ── OnEnter(Menu): spawn UI ───────────────────────────────────────────────────

/// Spawn the overlay.
///
/// ```text
/// ┌───────────────────────────┐
/// │       SPACE BATTLE        │
/// │                           │
/// │        [ START ]          │
/// │   press Enter to start    │
/// └───────────────────────────┘
/// ```
pub fn setup_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(overlay_bg()),
            MenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("SPACE BATTLE"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 48.0);

            root.spawn((
                Button,
                Node {
                    width: Val::Px(200.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(start_bg()),
                BorderColor::all(start_border()),
                MenuStartButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("START"),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(start_text()),
                ));
            });

            spacer(root, 14.0);

            root.spawn((
                Text::new("press Enter to start"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnExit(Menu): despawn UI ──────────────────────────────────────────────────

pub fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (Menu only): start control ─────────────────────────────────────────

/// Write [`StartRequested`] on a START click or Enter; tint the label on hover.
pub fn menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut start: MessageWriter<StartRequested>,
) {
    if keys.just_pressed(KeyCode::Enter) {
        start.write(StartRequested);
    }

    for (interaction, children) in start_query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                start.write(StartRequested);
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => start_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }
}
