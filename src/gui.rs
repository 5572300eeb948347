use std::collections::BTreeSet;

use eframe::egui;
use log::{debug, info};

use crate::board::SquareColor;
use crate::coords::{position_of, Coords, BOARD_SIZE};
use crate::game::Game;
use crate::piece::{PieceType, Promotion, Side};

/// Two players sharing one board. Clicks select a piece and then a highlighted
/// destination; all legality questions go to the `Game`.
pub struct ChessGUI {
    game: Game,
    selected_square: Option<Coords>,
    hints: BTreeSet<Coords>,
    /// A promoting move waiting for the player to pick a piece.
    pending_promotion: Option<(Coords, Coords)>,
    status: String,
}

fn piece_glyph(piece_type: PieceType, side: Side) -> &'static str {
    match (piece_type, side) {
        (PieceType::Pawn, Side::White) => "♙",
        (PieceType::Knight, Side::White) => "♘",
        (PieceType::Bishop, Side::White) => "♗",
        (PieceType::Rook, Side::White) => "♖",
        (PieceType::Queen, Side::White) => "♕",
        (PieceType::King, Side::White) => "♔",
        (PieceType::Pawn, Side::Black) => "♟",
        (PieceType::Knight, Side::Black) => "♞",
        (PieceType::Bishop, Side::Black) => "♝",
        (PieceType::Rook, Side::Black) => "♜",
        (PieceType::Queen, Side::Black) => "♛",
        (PieceType::King, Side::Black) => "♚",
    }
}

impl ChessGUI {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_perspective(Side::White)
    }

    fn with_perspective(perspective: Side) -> Self {
        Self {
            game: Game::new(perspective),
            selected_square: None,
            hints: BTreeSet::new(),
            pending_promotion: None,
            status: "White to move".to_string(),
        }
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.hints.clear();
    }

    /// Selects the piece on `square` if it belongs to the side to move.
    fn select(&mut self, square: Coords) {
        let owned = self.game.board().piece_at(square).map(|p| p.side()) == Some(self.game.turn());
        if owned {
            self.selected_square = Some(square);
            self.hints = self.game.valid_moves(square);
        } else {
            self.clear_selection();
        }
    }

    fn handle_square_click(&mut self, square: Coords) {
        if self.pending_promotion.is_some() {
            return;
        }

        match self.selected_square {
            Some(src) if self.hints.contains(&square) => {
                self.clear_selection();
                if self.game.board_mut().is_promotion_move(src, square) {
                    self.pending_promotion = Some((src, square));
                    self.status = "Choose a promotion piece".to_string();
                } else {
                    self.play(src, square, None);
                }
            }
            Some(src) if src == square => self.clear_selection(),
            _ => self.select(square),
        }
    }

    fn promote(&mut self, choice: Promotion) {
        if let Some((src, dest)) = self.pending_promotion.take() {
            self.play(src, dest, Some(choice));
        }
    }

    fn play(&mut self, src: Coords, dest: Coords, promotion: Option<Promotion>) {
        let perspective = self.game.board().perspective();
        match self.game.play(src, dest, promotion) {
            Ok(outcome) => {
                debug!("played {} -> {}: {:?}", src, dest, outcome);
                self.status = format!(
                    "{} {}, {} to move",
                    position_of(src, perspective),
                    position_of(dest, perspective),
                    self.game.turn()
                );
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn draw_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.add_space(20.0);
            let turn = self.game.turn();
            ui.label(egui::RichText::new(format!("{} to move", turn)).size(16.0).strong());
            if self.game.in_check() {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), "Check!");
            }
            ui.add_space(10.0);
            ui.label(self.status.as_str());

            if self.pending_promotion.is_some() {
                ui.add_space(20.0);
                ui.label("Promote to:");
                for choice in Promotion::ALL {
                    let glyph = piece_glyph(choice.piece_type(), turn);
                    if ui.button(egui::RichText::new(glyph).size(28.0)).clicked() {
                        self.promote(choice);
                    }
                }
            }
        });
    }

    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let board_size = ui.available_width().min(ui.available_height()) - 40.0;
        let square_size = board_size / BOARD_SIZE as f32;

        let board_rect = egui::Rect::from_min_size(ui.cursor().min, egui::vec2(board_size, board_size));
        let board_response = ui.allocate_rect(board_rect, egui::Sense::click());

        let board = self.game.board();
        for square in board.squares() {
            let coords = square.coords();
            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    board_rect.min.x + coords.col as f32 * square_size,
                    board_rect.min.y + coords.row as f32 * square_size,
                ),
                egui::vec2(square_size, square_size),
            );

            let color = if Some(coords) == self.selected_square {
                egui::Color32::from_rgb(255, 255, 0)
            } else {
                match square.color() {
                    SquareColor::Light => egui::Color32::from_rgb(240, 217, 181),
                    SquareColor::Dark => egui::Color32::from_rgb(181, 136, 99),
                }
            };
            ui.painter().rect_filled(rect, 0.0, color);

            if let Some(piece) = board.piece_at(coords) {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    piece_glyph(piece.piece_type(), piece.side()),
                    egui::FontId::proportional(square_size * 0.8),
                    match piece.side() {
                        Side::White => egui::Color32::WHITE,
                        Side::Black => egui::Color32::BLACK,
                    },
                );
            }

            if self.hints.contains(&coords) {
                ui.painter().circle_filled(
                    rect.center(),
                    square_size * 0.15,
                    egui::Color32::from_rgba_unmultiplied(40, 40, 40, 110),
                );
            }
        }

        if board_response.clicked() {
            if let Some(mouse_pos) = board_response.interact_pointer_pos() {
                let col = ((mouse_pos.x - board_rect.min.x) / square_size).floor() as i32;
                let row = ((mouse_pos.y - board_rect.min.y) / square_size).floor() as i32;
                let clicked = Coords::new(row, col);
                if clicked.in_bounds() {
                    self.handle_square_click(clicked);
                }
            }
        }
    }

    fn draw_perspective_selector(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("New game, seen from:");
            if ui.button("White").clicked() {
                *self = Self::with_perspective(Side::White);
                info!("starting new game from white's side");
            }
            if ui.button("Black").clicked() {
                *self = Self::with_perspective(Side::Black);
                info!("starting new game from black's side");
            }
        });
    }
}

impl eframe::App for ChessGUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::containers::panel::TopBottomPanel::top("perspective_selector").show(ctx, |ui| {
            self.draw_perspective_selector(ui);
        });

        egui::SidePanel::left("status").min_width(140.0).show(ctx, |ui| {
            self.draw_side_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui);
        });
    }
}

pub fn run_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(800.0, 800.0)),
        ..Default::default()
    };
    eframe::run_native("Chess", options, Box::new(|cc| Box::new(ChessGUI::new(cc))))
}
