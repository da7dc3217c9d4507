//! Continue / quit menu driven by the tag cursor.

use serde::Serialize;

use crate::config::{MenuLayout, Navigation, ResetValues};
use crate::game::GameState;
use crate::model::GameObject;

// DirectInput scan codes
pub const DIK_S: i32 = 0x1F;
pub const DIK_UP: i32 = 0xC8;
pub const DIK_DOWN: i32 = 0xD0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Confirm,
    Other(i32),
}

impl Key {
    pub fn from_code(code: i32) -> Self {
        match code {
            DIK_UP => Self::Up,
            DIK_DOWN => Self::Down,
            DIK_S => Self::Confirm,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Up => DIK_UP,
            Self::Down => DIK_DOWN,
            Self::Confirm => DIK_S,
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuChoice {
    Continue,
    Quit,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuEvent {
    Ignored,
    Moved(MenuChoice),
    Continued,
    Exited,
}

/// The cursor only counts as "continue" when it sits exactly on that row.
pub fn choice_at(tag_y: f32, menu: &MenuLayout) -> MenuChoice {
    if tag_y == menu.continue_y {
        MenuChoice::Continue
    } else {
        MenuChoice::Quit
    }
}

fn y_of(choice: MenuChoice, menu: &MenuLayout) -> f32 {
    match choice {
        MenuChoice::Continue => menu.continue_y,
        MenuChoice::Quit => menu.quit_y,
    }
}

/// Row the cursor moves to for a navigation key.
pub fn move_target(key: Key, tag_y: f32, menu: &MenuLayout) -> Option<MenuChoice> {
    let target = match (menu.navigation, key) {
        (Navigation::Directional, Key::Up) => MenuChoice::Continue,
        (Navigation::Directional, Key::Down) => MenuChoice::Quit,
        (Navigation::Toggle, Key::Down) if tag_y == menu.continue_y => MenuChoice::Quit,
        (Navigation::Toggle, Key::Down) => MenuChoice::Continue,
        (Navigation::Toggle, Key::Up) if tag_y == menu.quit_y => MenuChoice::Continue,
        (Navigation::Toggle, Key::Up) => MenuChoice::Quit,
        (_, Key::Confirm | Key::Other(_)) => return None,
    };
    Some(target)
}

pub fn handle_key_down(
    key: Key,
    tag: &mut GameObject,
    menu: &MenuLayout,
    reset: &ResetValues,
    game: &mut impl GameState,
) -> MenuEvent {
    match key {
        Key::Up | Key::Down => match move_target(key, tag.y, menu) {
            Some(choice) => {
                tag.set_position(menu.x, y_of(choice, menu));
                MenuEvent::Moved(choice)
            }
            None => MenuEvent::Ignored,
        },
        Key::Confirm => match choice_at(tag.y, menu) {
            MenuChoice::Continue => {
                game.set_coin(0);
                game.set_score(0);
                game.set_lives(reset.lives);
                game.set_player_position(reset.player_x, reset.player_y);
                game.reset_items();
                game.switch_scene(reset.map_scene);
                MenuEvent::Continued
            }
            MenuChoice::Quit => {
                game.exit();
                MenuEvent::Exited
            }
        },
        Key::Other(code) => {
            tracing::trace!("ignoring key {code:#x}");
            MenuEvent::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Session;
    use crate::model::ObjectKind;

    fn tag_at(y: f32) -> GameObject {
        let mut tag = GameObject::new(ObjectKind::Tag);
        tag.set_position(140.0, y);
        tag
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code(0xC8), Key::Up);
        assert_eq!(Key::from_code(0xD0), Key::Down);
        assert_eq!(Key::from_code(0x1F), Key::Confirm);
        assert_eq!(Key::from_code(0x01), Key::Other(0x01));
        assert_eq!(Key::Confirm.code(), DIK_S);
    }

    #[test]
    fn test_toggle_returns_after_two_moves() {
        let menu = MenuLayout::default();
        let reset = ResetValues::default();
        let mut game = Session::default();

        for start in [menu.continue_y, menu.quit_y] {
            for (first, second) in [
                (Key::Up, Key::Up),
                (Key::Down, Key::Down),
                (Key::Up, Key::Down),
                (Key::Down, Key::Up),
            ] {
                let mut tag = tag_at(start);
                handle_key_down(first, &mut tag, &menu, &reset, &mut game);
                assert_ne!(tag.y, start);
                handle_key_down(second, &mut tag, &menu, &reset, &mut game);
                assert_eq!(tag.y, start, "{first:?} then {second:?} from {start}");
            }
        }
    }

    #[test]
    fn test_directional_navigation() {
        let menu = MenuLayout {
            navigation: Navigation::Directional,
            ..MenuLayout::default()
        };
        assert_eq!(move_target(Key::Down, menu.quit_y, &menu), Some(MenuChoice::Quit));
        assert_eq!(move_target(Key::Up, menu.continue_y, &menu), Some(MenuChoice::Continue));
        assert_eq!(move_target(Key::Confirm, menu.continue_y, &menu), None);
    }

    #[test]
    fn test_confirm_continue_resets_game() {
        let menu = MenuLayout::default();
        let reset = ResetValues::default();
        let mut game = Session {
            coin: 55,
            score: 1200,
            lives: 0,
            items: vec![1, 2, 3],
            ..Session::default()
        };
        let mut tag = tag_at(menu.continue_y);

        let event = handle_key_down(Key::Confirm, &mut tag, &menu, &reset, &mut game);

        assert_eq!(event, MenuEvent::Continued);
        assert_eq!((game.coin, game.score, game.lives), (0, 0, 2));
        assert_eq!(game.player, (reset.player_x, reset.player_y));
        assert!(game.items.is_empty());
        assert_eq!(game.next_scene, Some(1));
        assert!(!game.exit_requested);
    }

    #[test]
    fn test_confirm_elsewhere_exits() {
        let menu = MenuLayout::default();
        let mut game = Session { coin: 5, ..Session::default() };

        for y in [menu.quit_y, 50.0] {
            let mut tag = tag_at(y);
            let event = handle_key_down(Key::Confirm, &mut tag, &menu, &ResetValues::default(), &mut game);
            assert_eq!(event, MenuEvent::Exited);
        }
        assert!(game.exit_requested);
        assert_eq!(game.coin, 5, "quitting leaves the game untouched");
        assert_eq!(game.next_scene, None);
    }
}
