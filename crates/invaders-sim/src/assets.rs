//! Built-in sprite masks — the in-repo stand-in for the external
//! asset provider. The simulation only ever needs width/height and
//! per-pixel alpha from these, plus pixel mutation for bunkers.

use std::collections::HashMap;

use invaders_core::enums::SpriteId;
use invaders_core::sprite::Sprite;

/// Sprite store with a memoized opaque-pixel count per asset, so
/// repeated construction from the same asset never re-scans pixels
/// (bunker lives are derived from that count).
#[derive(Debug, Clone)]
pub struct Assets {
    sprites: HashMap<SpriteId, Sprite>,
    opaque_counts: HashMap<SpriteId, i32>,
}

impl Assets {
    pub fn new() -> Self {
        let mut sprites = HashMap::new();
        for id in SpriteId::ALL {
            sprites.insert(id, build_sprite(id));
        }
        let opaque_counts = sprites
            .iter()
            .map(|(&id, sprite)| (id, sprite.opaque_pixels()))
            .collect();
        Self {
            sprites,
            opaque_counts,
        }
    }

    /// The pristine sprite for an asset. Entities clone it so each
    /// owns its image exclusively.
    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        &self.sprites[&id]
    }

    /// Memoized count of opaque pixels in the pristine asset.
    pub fn opaque_pixels(&self, id: SpriteId) -> i32 {
        self.opaque_counts[&id]
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}

fn build_sprite(id: SpriteId) -> Sprite {
    match id {
        SpriteId::PlayerShip => Sprite::from_rows(&[
            "      #      ",
            "     ###     ",
            "     ###     ",
            " ########### ",
            "#############",
            "#############",
            "#############",
            "#############",
        ]),
        SpriteId::EnemyTier1 => Sprite::from_rows(&[
            "    ####    ",
            "  ########  ",
            " ########## ",
            "### #### ###",
            "############",
            "  ##    ##  ",
            " ##  ##  ## ",
            "##        ##",
        ]),
        SpriteId::EnemyTier2 => Sprite::from_rows(&[
            "  #      #  ",
            "   #    #   ",
            "  ########  ",
            " ## #### ## ",
            "############",
            "# ######## #",
            "# #      # #",
            "   ##  ##   ",
        ]),
        SpriteId::EnemyTier3 => Sprite::from_rows(&[
            "   ######   ",
            " ########## ",
            "############",
            "###  ##  ###",
            "############",
            "   ##  ##   ",
            "  ## ## ##  ",
            "##        ##",
        ]),
        SpriteId::EnemyTier4 => Sprite::from_rows(&[
            "  #      #  ",
            "#  #    #  #",
            "#  ######  #",
            "### #### ###",
            "############",
            " ########## ",
            "  #      #  ",
            " #        # ",
        ]),
        SpriteId::EnemyTier5 => Sprite::from_rows(&[
            "    ####    ",
            " ########## ",
            "############",
            "## ## ## ###",
            "############",
            " ########## ",
            "   #    #   ",
            "    #  #    ",
        ]),
        SpriteId::Missile => Sprite::from_rows(&[
            " # ",
            "###",
            "###",
            "###",
            "###",
            "###",
            "###",
            " # ",
        ]),
        SpriteId::Bunker => Sprite::from_rows(&[
            "     ############     ",
            "    ##############    ",
            "   ################   ",
            "  ##################  ",
            " #################### ",
            "######################",
            "######################",
            "######################",
            "######################",
            "######################",
            "######################",
            "######################",
            "########      ########",
            "#######        #######",
            "######          ######",
            "######          ######",
        ]),
        SpriteId::Heart => Sprite::from_rows(&[
            " ##  ## ",
            "########",
            "########",
            " ###### ",
            "  ####  ",
            "   ##   ",
        ]),
        SpriteId::Explosion => Sprite::from_rows(&[
            "  #   #   #  ",
            " #  # # #  # ",
            "  # ##### #  ",
            "#### ### ####",
            "  # ##### #  ",
            " #  # # #  # ",
            "  #   #   #  ",
        ]),
    }
}
